use std::{fs::File, io::BufWriter, path::Path, time::Duration};

use log::info;
use reqwest::blocking::Client;

use crate::error::{Result, ScrubError};

/// Streams the body at `url` into `destination`. Returns the byte count.
pub fn download_to(url: &str, destination: &Path, timeout: Duration) -> Result<u64> {
    info!("Downloading file from {url}");
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let mut response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrubError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut sink = BufWriter::new(File::create(destination)?);
    let bytes = response.copy_to(&mut sink)?;
    sink.into_inner().map_err(|err| err.into_error())?;
    info!("Downloaded {bytes} byte(s) to {destination:?}");
    Ok(bytes)
}
