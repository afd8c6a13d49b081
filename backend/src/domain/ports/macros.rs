//! Helper macro for declaring driven-port error enums.
//!
//! Every variant carries a `message: String` so adapters can describe the
//! failure without leaking driver types across the port.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $summary:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{}: {message}", $summary)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`] error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Adapter-supplied description of the failure.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Generated constructors and accessors.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "sample store unreachable",
            Rejected => "sample store rejected write",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = SamplePortError::unreachable("refused");
        assert_eq!(err.to_string(), "sample store unreachable: refused");
    }

    #[test]
    fn message_returns_raw_detail() {
        let err = SamplePortError::rejected("check violated");
        assert_eq!(err.message(), "check violated");
    }
}
