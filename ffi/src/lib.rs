//! C-ABI wrapper around `mtg-core`.
//!
//! # Overview
//! Lets the mobile UI (Swift, Kotlin, or anything with a C FFI) use the card
//! service without linking Rust's async runtime: the host builds a request
//! here, performs the `GET` with its own networking stack, then hands the
//! response, or the reason there was none, back for classification and
//! decoding.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `mtg_build_*` / `mtg_parse_cards` mirror the core service 1:1, so the
//!   host gets exactly the URLs and error classification `ReqwestClient` would.
//! - A single `FfiCardsResult` envelope conveys cards and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `mtg_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use mtg_core::{CardsService, HostIo, HttpResponse, TransportFailure};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string.
unsafe fn read_c_string(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Service lifecycle
// ---------------------------------------------------------------------------

/// Create a service for the public cards API.
///
/// The caller must free the returned pointer with `mtg_service_free`.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_service_new_default() -> *mut FfiCardsService {
    catch_unwind(|| {
        let service = CardsService::new(HostIo);
        Box::into_raw(Box::new(FfiCardsService { inner: service }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a service bound to `base_url`, e.g. a local mock server.
///
/// Returns null if `base_url` is null or not an http(s) URL.
/// The caller must free the returned pointer with `mtg_service_free`.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_service_new(base_url: *const c_char) -> *mut FfiCardsService {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_c_string(base_url) };
        match CardsService::with_base_url(HostIo, &url) {
            Ok(service) => Box::into_raw(Box::new(FfiCardsService { inner: service })),
            Err(error) => {
                log::warn!("{error}");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a service created by `mtg_service_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_service_free(service: *mut FfiCardsService) {
    if !service.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(service) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for the unfiltered card list.
///
/// Returns null if `service` is null.
/// The caller must free the returned pointer with `mtg_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_build_get_cards(service: *const FfiCardsService) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if service.is_null() {
            return std::ptr::null_mut();
        }
        let service = unsafe { &*service };
        FfiHttpRequest::from_core(service.inner.build_get_cards())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for cards matching `name`. An empty `name` builds the
/// unfiltered request.
///
/// Returns null if `service` or `name` is null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_build_get_cards_by_name(
    service: *const FfiCardsService,
    name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if service.is_null() || name.is_null() {
            return std::ptr::null_mut();
        }
        let service = unsafe { &*service };
        let name = unsafe { read_c_string(name) };
        FfiHttpRequest::from_core(service.inner.build_get_cards_by_name(&name))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Result functions
// ---------------------------------------------------------------------------

/// Classify and decode the response to a `mtg_build_*` request.
///
/// Returns a result with `cards` set on success.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_parse_cards(
    service: *const FfiCardsService,
    response: *const FfiHttpResponse,
) -> *mut FfiCardsResult {
    catch_unwind(|| {
        if service.is_null() {
            return FfiCardsResult::null_arg("service");
        }
        if response.is_null() {
            return FfiCardsResult::null_arg("response");
        }
        let service = unsafe { &*service };
        let response = unsafe { &*response };
        let body = if response.body.is_null() {
            String::new()
        } else {
            unsafe { read_c_string(response.body) }
        };
        let status = response.status;

        let core_response = HttpResponse {
            status,
            headers: Vec::new(),
            body,
        };
        match service.inner.parse_cards(core_response) {
            Ok(cards) => FfiCardsResult::ok_cards(cards, status),
            Err(error) => {
                log::warn!("response {status} classified as {error:?}");
                FfiCardsResult::from_error(error, status)
            }
        }
    })
    .unwrap_or_else(|_| FfiCardsResult::panic("panic in mtg_parse_cards"))
}

/// Classify a request that produced no response. `message` is an optional
/// description from the host's networking stack and may be null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_transport_failure(
    service: *const FfiCardsService,
    kind: FfiTransportFailure,
    message: *const c_char,
) -> *mut FfiCardsResult {
    catch_unwind(|| {
        if service.is_null() {
            return FfiCardsResult::null_arg("service");
        }
        let service = unsafe { &*service };
        let failure = match kind {
            FfiTransportFailure::NotConnected => TransportFailure::NotConnected,
            FfiTransportFailure::HostNotFound => TransportFailure::HostNotFound,
            FfiTransportFailure::Other if message.is_null() => {
                TransportFailure::Other(String::new())
            }
            FfiTransportFailure::Other => {
                TransportFailure::Other(unsafe { read_c_string(message) })
            }
        };

        let error = service.inner.transport_error(&failure);
        log::warn!("transport failure {failure:?} classified as {error:?}");
        FfiCardsResult::from_error(error, 0)
    })
    .unwrap_or_else(|_| FfiCardsResult::panic("panic in mtg_transport_failure"))
}

/// Copy the detail text of a card from a result's card list.
///
/// Returns null if `card` is null. The copy outlives the result it came from;
/// the caller must free it with `mtg_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_card_description(card: *const FfiCard) -> *mut c_char {
    catch_unwind(|| {
        if card.is_null() {
            return std::ptr::null_mut();
        }
        let card = unsafe { &*card };
        if card.description.is_null() {
            return std::ptr::null_mut();
        }
        to_c_string(unsafe { read_c_string(card.description) })
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `mtg_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiCardsResult` returned by `mtg_parse_cards` or
/// `mtg_transport_failure`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_free_result(result: *mut FfiCardsResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.cards.is_null() {
            let list = unsafe { Box::from_raw(result.cards) };
            if !list.items.is_null() && list.len > 0 {
                let items = unsafe {
                    Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                        list.items,
                        list.len as usize,
                    ))
                };
                for card in items.iter() {
                    card.free_fields();
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mtg_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn mock_service() -> *mut FfiCardsService {
        let url = CString::new("http://localhost:3000").unwrap();
        mtg_service_new(url.as_ptr())
    }

    const ONE_CARD: &str = r#"{"cards":[{"name":"Forest","type":"Land","rarity":"Common","setName":"Limited Edition","manaCost":null,"originalText":null,"imageUrl":null}]}"#;

    #[test]
    fn service_new_and_free() {
        let service = mock_service();
        assert!(!service.is_null());
        mtg_service_free(service);

        let service = mtg_service_new_default();
        assert!(!service.is_null());
        mtg_service_free(service);
    }

    #[test]
    fn service_new_null_returns_null() {
        assert!(mtg_service_new(std::ptr::null()).is_null());
    }

    #[test]
    fn service_new_invalid_url_returns_null() {
        let url = CString::new("not a url").unwrap();
        assert!(mtg_service_new(url.as_ptr()).is_null());
    }

    #[test]
    fn service_free_null_is_safe() {
        mtg_service_free(std::ptr::null_mut());
    }

    #[test]
    fn build_get_cards_targets_public_api() {
        let service = mtg_service_new_default();
        let req = mtg_build_get_cards(service);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(c_str(req_ref.url), "https://api.magicthegathering.io/v1/cards");
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(c_str(header.key), "accept");
        assert_eq!(c_str(header.value), "application/json");

        mtg_free_request(req);
        mtg_service_free(service);
    }

    #[test]
    fn build_get_cards_null_service_returns_null() {
        assert!(mtg_build_get_cards(std::ptr::null()).is_null());
    }

    #[test]
    fn build_get_cards_by_name_encodes_name() {
        let service = mtg_service_new_default();
        let name = CString::new("Black Lotus").unwrap();
        let req = mtg_build_get_cards_by_name(service, name.as_ptr());
        assert!(!req.is_null());

        let url = c_str(unsafe { &*req }.url);
        assert_eq!(
            url,
            "https://api.magicthegathering.io/v1/cards?name=Black%20Lotus"
        );

        mtg_free_request(req);
        mtg_service_free(service);
    }

    #[test]
    fn build_get_cards_by_empty_name_is_unfiltered() {
        let service = mock_service();
        let name = CString::new("").unwrap();
        let filtered = mtg_build_get_cards_by_name(service, name.as_ptr());
        let unfiltered = mtg_build_get_cards(service);

        assert_eq!(
            c_str(unsafe { &*filtered }.url),
            c_str(unsafe { &*unfiltered }.url)
        );

        mtg_free_request(filtered);
        mtg_free_request(unfiltered);
        mtg_service_free(service);
    }

    #[test]
    fn build_get_cards_by_null_name_returns_null() {
        let service = mock_service();
        assert!(mtg_build_get_cards_by_name(service, std::ptr::null()).is_null());
        mtg_service_free(service);
    }

    #[test]
    fn parse_cards_success() {
        let service = mock_service();
        let body = CString::new(ONE_CARD).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mtg_parse_cards(service, &resp);
        assert!(!result.is_null());

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.http_status, 200);

        let list = unsafe { &*r.cards };
        assert_eq!(list.len, 1);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(c_str(items[0].name), "Forest");
        assert_eq!(c_str(items[0].card_type), "Land");
        assert!(items[0].mana_cost.is_null());
        assert!(items[0].original_text.is_null());
        assert!(items[0].image_url.is_null());
        assert!(c_str(items[0].description).contains("Mana cost: Unknown"));

        mtg_free_result(result);
        mtg_service_free(service);
    }

    #[test]
    fn parse_cards_empty_list() {
        let service = mock_service();
        let body = CString::new(r#"{"cards":[]}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mtg_parse_cards(service, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let list = unsafe { &*r.cards };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());

        mtg_free_result(result);
        mtg_service_free(service);
    }

    #[test]
    fn parse_cards_classifies_statuses() {
        let service = mock_service();
        let body = CString::new("").unwrap();
        for (status, code) in [
            (404, FfiErrorCode::WrongUrl),
            (400, FfiErrorCode::ServerFail),
            (450, FfiErrorCode::ServerFail),
            (499, FfiErrorCode::ServerFail),
            (500, FfiErrorCode::ServerFail),
        ] {
            let resp = FfiHttpResponse {
                status,
                body: body.as_ptr(),
            };
            let result = mtg_parse_cards(service, &resp);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, code, "status {status}");
            assert_eq!(r.http_status, status);
            assert!(!r.error_message.is_null());
            assert!(r.cards.is_null());
            mtg_free_result(result);
        }
        mtg_service_free(service);
    }

    #[test]
    fn parse_cards_decode_failures() {
        let service = mock_service();

        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        let result = mtg_parse_cards(service, &resp);
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NoParsingData);
        mtg_free_result(result);

        let body = CString::new("{\"cards\":").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mtg_parse_cards(service, &resp);
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::ParsingError);
        mtg_free_result(result);

        mtg_service_free(service);
    }

    #[test]
    fn parse_null_service_returns_null_arg() {
        let body = CString::new(ONE_CARD).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mtg_parse_cards(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(c_str(r.error_message), "null argument: service");

        mtg_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let service = mock_service();
        let result = mtg_parse_cards(service, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);

        mtg_free_result(result);
        mtg_service_free(service);
    }

    #[test]
    fn transport_failures_are_classified() {
        let service = mock_service();
        let message = CString::new("connection reset by peer").unwrap();
        for (kind, message, code) in [
            (FfiTransportFailure::NotConnected, std::ptr::null(), FfiErrorCode::NetworkProblem),
            (FfiTransportFailure::HostNotFound, std::ptr::null(), FfiErrorCode::WrongUrl),
            (FfiTransportFailure::Other, message.as_ptr(), FfiErrorCode::ServerFail),
            (FfiTransportFailure::Other, std::ptr::null(), FfiErrorCode::ServerFail),
        ] {
            let result = mtg_transport_failure(service, kind, message);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, code, "{kind:?}");
            assert_eq!(r.http_status, 0);
            assert!(r.cards.is_null());
            mtg_free_result(result);
        }
        mtg_service_free(service);
    }

    #[test]
    fn transport_failure_null_service_returns_null_arg() {
        let result =
            mtg_transport_failure(std::ptr::null(), FfiTransportFailure::Other, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        mtg_free_result(result);
    }

    #[test]
    fn card_description_outlives_result() {
        let service = mock_service();
        let body = CString::new(ONE_CARD).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = mtg_parse_cards(service, &resp);
        let card = unsafe { &*(*(*result).cards).items };

        let description = mtg_card_description(card);
        mtg_free_result(result);

        assert!(!description.is_null());
        assert_eq!(
            c_str(description),
            "Name: Forest\nMana cost: Unknown\nType: Land\nRarity: Common\nSet: Limited Edition"
        );
        mtg_free_string(description);
        mtg_service_free(service);
    }

    #[test]
    fn card_description_null_returns_null() {
        assert!(mtg_card_description(std::ptr::null()).is_null());
    }

    #[test]
    fn free_request_null_is_safe() {
        mtg_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        mtg_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        mtg_free_string(std::ptr::null_mut());
    }
}
