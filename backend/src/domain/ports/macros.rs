//! Helper macro for port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor whose
//! parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoragePortError {
            Unavailable { message: String } => "store unavailable: {message}",
            Rejected { message: String, rows: u64 } => "rejected {rows} rows: {message}",
        }
    }

    #[test]
    fn constructor_accepts_borrowed_strings() {
        let err = StoragePortError::unavailable("pool drained");
        assert_eq!(err.to_string(), "store unavailable: pool drained");
    }

    #[test]
    fn constructor_keeps_field_order() {
        let err = StoragePortError::rejected("duplicate key", 3_u64);
        assert_eq!(
            err,
            StoragePortError::Rejected {
                message: "duplicate key".to_owned(),
                rows: 3
            }
        );
        assert_eq!(err.to_string(), "rejected 3 rows: duplicate key");
    }
}
