use thiserror::Error;

use crate::ephemeris::{Body, Event};
use crate::observers::horizon::Horizon;

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("No {event} of {body} found for horizon {horizon}")]
    EventNotFound {
        body: Body,
        event: Event,
        horizon: Horizon,
    },

    #[error("Invalid observing configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Time computation error: {0}")]
    TimeError(#[from] hifitime::HifitimeError),

    #[error("NaN encountered in site geometry: {0}")]
    NanError(#[from] ordered_float::FloatIsNan),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (
                EventNotFound {
                    body: b1,
                    event: e1,
                    horizon: h1,
                },
                EventNotFound {
                    body: b2,
                    event: e2,
                    horizon: h2,
                },
            ) => b1 == b2 && e1 == e2 && h1 == h2,
            (InvalidConfiguration(a), InvalidConfiguration(b)) => a == b,

            // not comparable: same variant is enough
            (TimeError(_), TimeError(_)) => true,
            (NanError(_), NanError(_)) => true,

            _ => false,
        }
    }
}
