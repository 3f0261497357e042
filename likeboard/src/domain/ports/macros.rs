//! Defines helper macros for generating domain port error enums.
//!
//! Each variant gets a snake_case constructor carrying the variant's docs.
//! Field arguments accept anything convertible with `Into`.

macro_rules! define_port_error {
    (@ctor [$(#[$meta:meta])*] $variant:ident) => {
        ::paste::paste! {
            $(#[$meta])*
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor [$(#[$meta:meta])*] $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl [$(#[$meta])*] $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl [$(#[$meta:meta])*] $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            $(#[$meta])*
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl [$(#[$meta:meta])*] $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            [$(#[$meta])*]
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
                $(#[doc = $variant_doc:expr])*
                $variant:ident $( {
                    $( $(#[doc = $field_doc:expr])* $field:ident : $ty:ty ),* $(,)?
                } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[doc = $variant_doc])*
                #[error($message)]
                $variant $( { $( $(#[doc = $field_doc])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor [$(#[doc = $variant_doc])*] $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;
