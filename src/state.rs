use crate::client::{ClientError, LinkApiClient};
use crate::config::{Config, TimeZonePolicy};
use crate::labels::LabelFormatter;

#[derive(Clone)]
pub struct AppState {
    pub client: LinkApiClient,
    pub timezone: TimeZonePolicy,
    pub labels: LabelFormatter,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: LinkApiClient::new(config.api_url.clone(), config.api_timeout)?,
            timezone: config.timezone,
            labels: LabelFormatter::new(config.locale),
        })
    }
}
