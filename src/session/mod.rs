//! Signed-in state: who is logged in and with which token.

mod bootstrap;
mod profile;
mod user;

pub use bootstrap::{bootstrap, Bootstrapped};
pub use profile::{forget_profile, persist_profile, restore_profile};
pub use user::{SessionUser, UserId};

use crate::auth::AuthToken;

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    SignedOut,
    Authenticated {
        token: AuthToken,
        user: SessionUser,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::SignedOut => None,
        }
    }

    pub fn user_mut(&mut self) -> Option<&mut SessionUser> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::SignedOut => None,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::SignedOut => None,
        }
    }
}
