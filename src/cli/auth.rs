use crate::{config::Config, error, youtube};

pub async fn auth(config: &Config) {
    if let Err(e) = youtube::login(&config.youtube).await {
        error!("{}", e);
    }
}
