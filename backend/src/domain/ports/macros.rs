//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! field parameters accept anything convertible into the field type, so
//! adapters can write `VolunteerRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ChannelError {
            Closed => "channel closed",
            Lagged { behind: u64 } => "consumer lagged by {behind} entries",
            Refused { stream: String, reason: String } => "{stream} refused write: {reason}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ChannelError::closed(), ChannelError::Closed);
        assert_eq!(ChannelError::closed().to_string(), "channel closed");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = ChannelError::lagged(3_u64);
        assert_eq!(err.to_string(), "consumer lagged by 3 entries");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ChannelError::refused("volunteer-events", "OOM");
        assert_eq!(err.to_string(), "volunteer-events refused write: OOM");
    }
}
