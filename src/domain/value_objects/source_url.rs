use url::Url;

use crate::domain::errors::DomainError;

/// Absolute http(s) URL a binary entry is downloaded from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(Url);

impl SourceUrl {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let url = Url::parse(trimmed).map_err(|e| DomainError::InvalidSourceUrl {
            url: value.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(DomainError::InvalidSourceUrl {
                    url: value.to_string(),
                    reason: format!("unsupported scheme '{}', expected http or https", other),
                })
            }
        }

        if url.host_str().is_none() {
            return Err(DomainError::InvalidSourceUrl {
                url: value.to_string(),
                reason: "URL has no host".to_string(),
            });
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_https(&self) -> bool {
        self.0.scheme() == "https"
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SourceUrl {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
