use thiserror::*;

pub type Result<E> = std::result::Result<E, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid raw value for {}", .type_name)]
    InvalidRawValue { type_name: &'static str },
}

impl Error {
    pub fn invalid_raw_value<I>() -> Self {
        Error::InvalidRawValue {
            type_name: std::any::type_name::<I>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Port;

    #[test]
    fn names_the_rejecting_type() {
        let e = Error::invalid_raw_value::<Port>();
        assert!(e.to_string().starts_with("Invalid raw value for "));
        assert!(e.to_string().ends_with("Port"));
    }
}
