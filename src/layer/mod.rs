//! # Trust Layers
//!
//! An asset identifier lives in one of three trust layers. Every log
//! starts at the local `peer` layer; migrations may promote it to a
//! web-hosted `webvh` identifier and from there to a Bitcoin-anchored
//! `btco` identifier. No other transitions exist, and a sealed log cannot
//! migrate.

mod btco;
mod did;
mod peer;
mod state;
mod webvh;

use serde::{Deserialize, Serialize};

pub use self::btco::BtcoManager;
pub use self::did::{btco_did, webvh_did};
pub use self::peer::PeerManager;
pub use self::state::{AssetState, resolve_state};
pub use self::webvh::{NO_WITNESSES, WebvhManager};

use crate::Error;

/// Trust layer of an asset identifier.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Local, peer-to-peer identifier.
    #[default]
    Peer,

    /// Web-hosted identifier.
    Webvh,

    /// Blockchain-anchored identifier.
    Btco,
}

impl Layer {
    /// `true` when `target` is a permitted migration from `self`.
    #[must_use]
    pub const fn can_migrate_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Peer, Self::Webvh) | (Self::Webvh, Self::Btco))
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peer => write!(f, "peer"),
            Self::Webvh => write!(f, "webvh"),
            Self::Btco => write!(f, "btco"),
        }
    }
}

impl std::str::FromStr for Layer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peer" => Ok(Self::Peer),
            "webvh" => Ok(Self::Webvh),
            "btco" => Ok(Self::Btco),
            other => Err(Error::MalformedLog(format!("unknown layer `{other}`"))),
        }
    }
}
