use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::AlgorithmId;

/// Console pages, addressed by the same paths as the web console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/algoritmos`
    List,
    /// `/algoritmos/novo`
    Create,
    /// `/algoritmos/{id}`
    Edit(AlgorithmId),
    /// `/quiz/{id}`
    Quiz(AlgorithmId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown route {0:?}")]
pub struct ParseRouteError(String);

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseRouteError(s.to_string());
        let segments: Vec<&str> = s.trim().trim_matches('/').split('/').collect();

        match segments.as_slice() {
            [""] | ["algoritmos"] => Ok(Route::List),
            ["algoritmos", "novo"] => Ok(Route::Create),
            ["algoritmos", id] => id.parse().map(Route::Edit).map_err(|_| error()),
            ["quiz", id] => id.parse().map(Route::Quiz).map_err(|_| error()),
            _ => Err(error()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/algoritmos"),
            Route::Create => write!(f, "/algoritmos/novo"),
            Route::Edit(id) => write!(f, "/algoritmos/{id}"),
            Route::Quiz(id) => write!(f, "/quiz/{id}"),
        }
    }
}
