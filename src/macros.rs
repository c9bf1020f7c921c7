//! Accessor macros for view-model and state enums
//!
//! These macros eliminate repetitive match code on enums whose variants
//! wrap one payload each. All macros use `paste` for identifier
//! concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert the method name to the variant name.
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Modal {
///     // scanner -> Scanner, entry_form -> EntryForm
///     impl_enum_accessors!(scanner: TokenScanner, entry_form: TokenEntryForm);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident: $inner:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is " [<$variant:camel>]]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get the " $variant " payload"]
                pub fn [<as_ $variant>](&self) -> Option<&$inner> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get the " $variant " payload mutably"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut $inner> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate a method that reads a `Copy` field from the payload of every variant
///
/// # Example
/// ```ignore
/// impl_variant_field_get!(identity, identity, &'static str, TextField, SegmentedControl);
/// // Expands to: pub fn identity(&self) -> &'static str { match self { ... e.identity ... } }
/// ```
#[macro_export]
macro_rules! impl_variant_field_get {
    ($method:ident, $field:ident, $ret:ty, $($variant:ident),* $(,)?) => {
        #[doc = concat!("Get `", stringify!($field), "` from any variant")]
        pub fn $method(&self) -> $ret {
            match self {
                $(Self::$variant(e) => e.$field,)*
            }
        }
    };
}
