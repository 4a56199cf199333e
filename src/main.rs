use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streambox_client::catalog::{home_feed, truncate, CatalogService, MovieSummary, TmdbClient};
use streambox_client::config::{AppConfig, CliConfig, FileConfig, SecretBackendKind};
use streambox_client::theme::ThemeMode;
use streambox_client::{AppContext, AppServices, FavoriteToggle};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "streambox", about = "Browse movies and keep a list of favorites")]
struct CliArgs {
    /// Path to a TOML config file. Values in it override command line flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the local storage files.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// API key for the movie database.
    #[clap(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    #[clap(long)]
    pub tmdb_base_url: Option<String>,

    /// Base URL for poster images.
    #[clap(long)]
    pub tmdb_image_base_url: Option<String>,

    /// Base URL for full-size backdrop images.
    #[clap(long)]
    pub tmdb_backdrop_base_url: Option<String>,

    #[clap(long)]
    pub auth_base_url: Option<String>,

    /// Timeout in seconds for HTTP requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,

    /// Where to keep the auth token.
    #[clap(long, value_enum, default_value_t = SecretBackendKind::Keyring)]
    pub secret_backend: SecretBackendKind,

    #[clap(long)]
    pub keyring_service: Option<String>,

    /// Theme used until one is picked.
    #[clap(long, default_value = "light")]
    pub default_theme: ThemeMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Signs in and loads the account's favorites.
    Login { username: String, password: String },

    /// Signs out. Favorites stay stored for the next login.
    Logout,

    /// Simulated sign-up; no account is created remotely.
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Shows the signed-in user.
    Whoami,

    /// Shows trending, popular and top rated movies.
    Home,

    Trending,
    Popular,
    TopRated,
    Upcoming,

    /// Lists movie genres.
    Genres,

    /// Lists movies of a genre.
    Genre { id: u64 },

    Search { query: String },

    /// Shows the details of a movie.
    Details { id: u64 },

    /// Lists the signed-in user's favorites.
    Favorites,

    /// Adds a movie to the favorites, or removes it if already there.
    Favorite { id: u64 },

    /// Sets a device-local profile picture.
    Avatar { uri: String },

    /// Shows the theme, or toggles it.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Toggle,
}

impl CliArgs {
    fn cli_config(&self) -> CliConfig {
        CliConfig {
            data_dir: self.data_dir.clone(),
            tmdb_api_key: self.tmdb_api_key.clone(),
            tmdb_base_url: self.tmdb_base_url.clone(),
            tmdb_image_base_url: self.tmdb_image_base_url.clone(),
            tmdb_backdrop_base_url: self.tmdb_backdrop_base_url.clone(),
            auth_base_url: self.auth_base_url.clone(),
            request_timeout_sec: self.request_timeout_sec,
            secret_backend: self.secret_backend,
            keyring_service: self.keyring_service.clone(),
            default_theme: self.default_theme,
        }
    }
}

fn print_movies(movies: &[MovieSummary]) {
    if movies.is_empty() {
        println!("No movies found.");
        return;
    }
    for movie in movies {
        println!(
            "{:>8}  {} ({})  {}",
            movie.id,
            movie.title,
            movie.release_year_label(),
            movie.rating_label()
        );
    }
}

fn catalog_client(config: &AppConfig) -> Result<TmdbClient> {
    TmdbClient::new(config.tmdb_settings()?)
}

async fn run(cli_args: CliArgs) -> Result<()> {
    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.cli_config(), file_config)?;
    let services = AppServices::from_config(&config)?;
    let mut app = AppContext::start(services, config.default_theme).await;

    match cli_args.command {
        Command::Login { username, password } => {
            let user = app.login(&username, &password).await?;
            println!("Welcome, {}!", user.display_name());
        }
        Command::Logout => {
            app.logout().await;
            println!("Signed out.");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            println!("{}", app.register(&name, &email, &password).await?);
        }
        Command::Whoami => match app.session().user() {
            Some(user) => {
                println!("{} [{}]", user.display_name(), user.initials());
                println!("  username: {}", user.username);
                println!("  email:    {}", user.email);
                if let Some(id) = &user.id {
                    println!("  id:       {}", id);
                }
                if let Some(avatar) = user.avatar_uri() {
                    println!("  avatar:   {}", avatar);
                }
                println!("  favorites: {}", app.favorites().len());
            }
            None => println!("Not signed in."),
        },
        Command::Home => {
            let catalog = catalog_client(&config)?;
            let feed = home_feed(&catalog).await?;
            for (label, movies) in [
                ("Trending", &feed.trending),
                ("Popular", &feed.popular),
                ("Top Rated", &feed.top_rated),
            ] {
                println!("== {} ==", label);
                print_movies(movies);
            }
        }
        Command::Trending => print_movies(&catalog_client(&config)?.trending().await?),
        Command::Popular => print_movies(&catalog_client(&config)?.popular().await?),
        Command::TopRated => print_movies(&catalog_client(&config)?.top_rated().await?),
        Command::Upcoming => print_movies(&catalog_client(&config)?.upcoming().await?),
        Command::Genres => {
            for genre in catalog_client(&config)?.genres().await? {
                println!("{:>8}  {}", genre.id, genre.name);
            }
        }
        Command::Genre { id } => {
            print_movies(&catalog_client(&config)?.movies_by_genre(id).await?)
        }
        Command::Search { query } => {
            print_movies(&catalog_client(&config)?.search(&query).await?)
        }
        Command::Details { id } => {
            let catalog = catalog_client(&config)?;
            let details = catalog.movie_details(id).await?;
            let movie = &details.summary;
            println!("{} ({})", movie.title, movie.release_year_label());
            if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
                println!("\"{}\"", tagline);
            }
            println!(
                "Rating: {}  Runtime: {}",
                movie.rating_label(),
                details.runtime_label()
            );
            let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            if !genres.is_empty() {
                println!("Genres: {}", genres.join(", "));
            }
            if let Some(image) = catalog.hero_image_url(movie) {
                println!("Image: {}", image);
            }
            if app.is_favorite(movie.id) {
                println!("In your favorites.");
            }
            println!();
            println!("{}", truncate(&movie.overview, 500));
        }
        Command::Favorites => {
            if !app.session().is_authenticated() {
                bail!("Sign in to see your favorites");
            }
            print_movies(app.favorites().items());
        }
        Command::Favorite { id } => {
            if !app.session().is_authenticated() {
                bail!("Sign in to manage favorites");
            }
            let details = catalog_client(&config)?.movie_details(id).await?;
            let title = details.summary.title.clone();
            let change = app.toggle_favorite(details.summary);
            if let Some(mirror) = change.mirror {
                mirror.write().await;
            }
            match change.outcome {
                FavoriteToggle::Added => println!("Added {} to favorites.", title),
                FavoriteToggle::Removed => println!("Removed {} from favorites.", title),
            }
        }
        Command::Avatar { uri } => {
            app.set_profile_avatar(&uri).await?;
            println!("Profile picture updated.");
        }
        Command::Theme { action } => {
            let mode = match action {
                Some(ThemeAction::Toggle) => app.toggle_theme().await,
                None => app.theme().mode(),
            };
            let palette = mode.palette();
            println!(
                "{} (background {}, text {})",
                mode.as_str(),
                palette.background,
                palette.text
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    run(cli_args).await
}
