// Request and response payloads

/// Request body accepted as either JSON or an HTML form post
///
/// `form_or_json!(PayloadName, RequestType)` declares a `PayloadName`
/// `ApiRequest` enum with `Json` and `Form` variants plus `into_inner()`.
macro_rules! form_or_json {
    ($payload:ident, $request:ty) => {
        #[derive(poem_openapi::ApiRequest, Debug)]
        pub enum $payload {
            Json(poem_openapi::payload::Json<$request>),
            Form(poem_openapi::payload::Form<$request>),
        }

        impl $payload {
            pub fn into_inner(self) -> $request {
                match self {
                    $payload::Json(body) => body.0,
                    $payload::Form(body) => body.0,
                }
            }
        }
    };
}

/// `Debug` that prints the listed secret fields as `<redacted>`
///
/// `redacted_debug!(Type { visible, fields } secret { password })`
macro_rules! redacted_debug {
    ($ty:ident { $($field:ident),* $(,)? } secret { $($secret:ident),+ $(,)? }) => {
        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($ty))
                    $(.field(stringify!($field), &self.$field))*
                    $(.field(stringify!($secret), &"<redacted>"))+
                    .finish()
            }
        }
    };
}

pub mod auth;
pub mod common;
pub mod complaint;
pub mod customer;
pub mod employee;
pub mod owner;
