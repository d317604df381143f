//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String` (null for `None`), raw pointers instead
//! of `Vec`, and enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use mtg_core::{Card, CardCollection, HostIo, HttpClientError, ServerError};

/// Opaque handle to a `CardsService`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCardsService {
    pub(crate) inner: mtg_core::CardsService<HostIo>,
}

/// Convert a Rust string into an owned C string. Interior NULs, which C
/// cannot represent, are dropped.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

fn to_nullable_c_string(s: Option<String>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), to_c_string)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A `GET` request described as C-compatible plain data.
///
/// Built by `mtg_build_*` functions. The C caller executes the request and
/// passes the response back through `mtg_parse_cards`, or reports why there
/// was no response through `mtg_transport_failure`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: mtg_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            url: to_c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing an HTTP request, then passes
/// a pointer to `mtg_parse_cards`. The FFI layer reads but does not free
/// these fields. A null `body` is treated as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Why a request produced no response, as observed by the host.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiTransportFailure {
    /// Offline, or the network is down or unreachable.
    NotConnected = 0,
    /// The host name did not resolve.
    HostNotFound = 1,
    /// Any other transport failure.
    Other = 2,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCardsResult`. One code per error kind, plus
/// the FFI-only `Panic` and `NullArg`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    WrongUrl = 1,
    NetworkProblem = 2,
    ServerFail = 3,
    NoParsingData = 4,
    ParsingError = 5,
    InvalidUrl = 6,
    Panic = 7,
    NullArg = 8,
}

impl From<&HttpClientError> for FfiErrorCode {
    fn from(err: &HttpClientError) -> Self {
        match err {
            HttpClientError::WrongUrl => FfiErrorCode::WrongUrl,
            HttpClientError::ServerError(ServerError::NetworkProblem) => {
                FfiErrorCode::NetworkProblem
            }
            HttpClientError::ServerError(ServerError::ServerFail) => FfiErrorCode::ServerFail,
            HttpClientError::NoParsingData => FfiErrorCode::NoParsingData,
            HttpClientError::ParsingError(_) => FfiErrorCode::ParsingError,
            HttpClientError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
        }
    }
}

/// A single card exposed to C. Optional fields are null when absent.
/// `description` is the ready-to-display detail text.
#[repr(C)]
pub struct FfiCard {
    pub name: *mut c_char,
    pub mana_cost: *mut c_char,
    pub card_type: *mut c_char,
    pub rarity: *mut c_char,
    pub set_name: *mut c_char,
    pub original_text: *mut c_char,
    pub image_url: *mut c_char,
    pub description: *mut c_char,
}

impl FfiCard {
    fn from_core(card: Card) -> Self {
        let description = to_c_string(card.to_string());
        FfiCard {
            name: to_c_string(card.name),
            mana_cost: to_nullable_c_string(card.mana_cost),
            card_type: to_c_string(card.card_type),
            rarity: to_c_string(card.rarity),
            set_name: to_c_string(card.set_name),
            original_text: to_nullable_c_string(card.original_text),
            image_url: to_nullable_c_string(card.image_url),
            description,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for field in [
            self.name,
            self.mana_cost,
            self.card_type,
            self.rarity,
            self.set_name,
            self.original_text,
            self.image_url,
            self.description,
        ] {
            if !field.is_null() {
                drop(unsafe { CString::from_raw(field) });
            }
        }
    }
}

/// A list of cards exposed to C, in server order.
#[repr(C)]
pub struct FfiCardList {
    pub items: *mut FfiCard,
    pub len: u32,
}

/// Result envelope for `mtg_parse_cards` and `mtg_transport_failure`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `cards`
/// points to the decoded list (possibly empty).
/// On failure `error_code` is the classified error, `error_message` is a
/// human-readable C string, and `cards` is null. `http_status` carries the
/// response status when there was a response, 0 otherwise.
#[repr(C)]
pub struct FfiCardsResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub cards: *mut FfiCardList,
}

impl FfiCardsResult {
    /// Build a success result carrying the decoded cards.
    pub(crate) fn ok_cards(collection: CardCollection, http_status: u16) -> *mut Self {
        let len = collection.len() as u32;
        let items = if collection.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_cards: Box<[FfiCard]> =
                collection.into_iter().map(FfiCard::from_core).collect();
            Box::into_raw(ffi_cards) as *mut FfiCard
        };

        let list = Box::new(FfiCardList { items, len });
        Box::into_raw(Box::new(FfiCardsResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status,
            cards: Box::into_raw(list),
        }))
    }

    /// Build an error result from a classified error.
    pub(crate) fn from_error(err: HttpClientError, http_status: u16) -> *mut Self {
        Self::failure(FfiErrorCode::from(&err), err.to_string(), http_status)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"), 0)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string(), 0)
    }

    fn failure(error_code: FfiErrorCode, message: String, http_status: u16) -> *mut Self {
        Box::into_raw(Box::new(FfiCardsResult {
            error_code,
            error_message: to_c_string(message),
            http_status,
            cards: std::ptr::null_mut(),
        }))
    }
}
