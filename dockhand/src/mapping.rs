//! Key/value mappings rendered as single engine flags.
//!
//! | Mapping | Rendered |
//! |---|---|
//! | [`PortMapping`] | `-p <host>:<container>` |
//! | [`EnvMapping`] | `-e <name>=<value>` |
//! | [`VolumeMapping`] | `-v <host>:<container>` |
//! | [`LabelMapping`] | `-l <name>=<value>` |
//!
//! Values are passed through as-is; no quoting is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Renders itself as one flag and its value.
pub trait Mapping {
    fn flag(&self) -> &'static str;

    fn value(&self) -> String;

    /// `[flag, value]` as argv tokens.
    fn to_args(&self) -> [String; 2] {
        [self.flag().to_string(), self.value()]
    }
}

macro_rules! display_via_mapping {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{} {}", self.flag(), self.value())
                }
            }
        )+
    };
}

/// Publishes a container port on the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    /// Host side: a bare port (`8080`) or `ip:port`.
    pub host: String,
    /// Container port, must be > 0.
    pub container: u16,
}

impl PortMapping {
    pub fn new(host: impl ToString, container: u16) -> Self {
        Self {
            host: host.to_string(),
            container,
        }
    }
}

impl Mapping for PortMapping {
    fn flag(&self) -> &'static str {
        "-p"
    }

    fn value(&self) -> String {
        format!("{}:{}", self.host, self.container)
    }
}

/// Environment variable set inside the container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvMapping {
    pub name: String,
    pub value: String,
}

impl EnvMapping {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Mapping for EnvMapping {
    fn flag(&self) -> &'static str {
        "-e"
    }

    fn value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Bind mount from host to container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMapping {
    pub host: String,
    pub container: String,
}

impl VolumeMapping {
    pub fn new(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }
}

impl Mapping for VolumeMapping {
    fn flag(&self) -> &'static str {
        "-v"
    }

    fn value(&self) -> String {
        format!("{}:{}", self.host, self.container)
    }
}

/// Container metadata label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    pub name: String,
    pub value: String,
}

impl LabelMapping {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Mapping for LabelMapping {
    fn flag(&self) -> &'static str {
        "-l"
    }

    fn value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

display_via_mapping!(PortMapping, EnvMapping, VolumeMapping, LabelMapping);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_mapping() {
        let port = PortMapping::new(8080, 80);
        assert_eq!(port.to_args(), ["-p".to_string(), "8080:80".to_string()]);
        assert_eq!(port.to_string(), "-p 8080:80");

        let bound = PortMapping::new("127.0.0.1:5432", 5432);
        assert_eq!(bound.value(), "127.0.0.1:5432:5432");
    }

    #[test]
    fn test_env_and_label_mapping() {
        assert_eq!(EnvMapping::new("PG_USER", "app").to_string(), "-e PG_USER=app");
        assert_eq!(
            LabelMapping::new("com.example.tier", "web").to_string(),
            "-l com.example.tier=web"
        );
    }

    #[test]
    fn test_values_are_not_escaped() {
        let env = EnvMapping::new("GREETING", "hello world");
        assert_eq!(env.value(), "GREETING=hello world");
    }

    #[test]
    fn test_volume_mapping() {
        let volume = VolumeMapping::new("/srv/data", "/var/lib/data");
        assert_eq!(volume.to_string(), "-v /srv/data:/var/lib/data");
    }
}
