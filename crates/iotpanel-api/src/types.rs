// Identifier and query types shared by the resource wrappers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }
    };
}

opaque_id!(
    /// Device identifier, interpolated verbatim into `/devices/{id}` paths.
    DeviceId
);

opaque_id!(
    /// Sensor record identifier (temperature or screenshot).
    RecordId
);

/// Query parameters for list/latest calls.
///
/// Passed through unmodified: an empty value sends no query string at all,
/// and nothing is injected beyond what the caller set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Conventional `device_id` filter.
    pub device_id: Option<DeviceId>,
    /// Any further backend-specific parameters, in order.
    pub extra: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Params filtering by a single device.
    pub fn for_device(device_id: impl Into<DeviceId>) -> Self {
        Self {
            device_id: Some(device_id.into()),
            extra: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.device_id.is_none() && self.extra.is_empty()
    }

    /// Flatten into ordered query pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.extra.len() + 1);
        if let Some(ref id) = self.device_id {
            pairs.push(("device_id".to_owned(), id.to_string()));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

impl From<Option<DeviceId>> for ListParams {
    fn from(device_id: Option<DeviceId>) -> Self {
        Self {
            device_id,
            extra: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_verbatim() {
        assert_eq!(DeviceId::from("dev/1?x").to_string(), "dev/1?x");
        assert_eq!(RecordId::from(42_u64).as_str(), "42");
    }

    #[test]
    fn empty_params_produce_no_pairs() {
        let params = ListParams::new();
        assert!(params.is_empty());
        assert!(params.to_pairs().is_empty());
    }

    #[test]
    fn device_filter_comes_first() {
        let params = ListParams::for_device("d1").with("limit", "5");
        assert_eq!(
            params.to_pairs(),
            vec![
                ("device_id".to_owned(), "d1".to_owned()),
                ("limit".to_owned(), "5".to_owned()),
            ]
        );
    }
}
