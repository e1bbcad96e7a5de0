//! User-facing failure messages.

use vinlookup_fetch::LookupError;
use vinlookup_store::StoreError;

/// Describes a command failure for the person at the terminal.
pub fn describe(err: &anyhow::Error) -> String {
    if let Some(lookup) = err.downcast_ref::<LookupError>() {
        return lookup_message(lookup);
    }
    if let Some(store) = err.downcast_ref::<StoreError>() {
        return store_message(store);
    }
    format!("{err:#}")
}

/// Message for a failed lookup or image-to-text call.
pub fn lookup_message(err: &LookupError) -> String {
    match err {
        LookupError::RateLimited => "The service is busy. Try again later.".to_string(),
        LookupError::ServerError { status: 401 | 403 } => {
            "The API key was rejected. Check it with `vinlookup config show`.".to_string()
        }
        LookupError::ServerError { status: 404 } => "No data found for this request.".to_string(),
        LookupError::ServerError { status } if *status >= 500 => {
            format!("The service is having problems (HTTP {status}). Try again later.")
        }
        LookupError::ServerError { status } => {
            format!("The service rejected the request (HTTP {status}).")
        }
        LookupError::BadResponse(detail) => {
            format!("Could not reach the service ({detail}). Check your connection.")
        }
        LookupError::Decoding(_) => "The service returned data in an unexpected format.".to_string(),
        LookupError::InvalidUrl(url) => {
            format!("The service address {url:?} is not valid. Check base_url in your settings.")
        }
        LookupError::Other(detail) => format!("Something went wrong: {detail}"),
    }
}

fn store_message(err: &StoreError) -> String {
    match err {
        StoreError::Serialization(_) => {
            format!("A saved data file is damaged and could not be read: {err}")
        }
        StoreError::Io(e) => format!("Could not access saved data: {e}"),
        StoreError::Config(detail) => detail.clone(),
    }
}
