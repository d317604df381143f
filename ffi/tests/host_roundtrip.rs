//! Host-does-IO round trip against the live mock server.
//!
//! # Design
//! Plays the role of the mobile host: builds requests through the C ABI,
//! executes them with ureq, and feeds responses (or transport failures) back
//! through `mtg_parse_cards` / `mtg_transport_failure`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use mtg_ffi::types::{
    FfiCardsResult, FfiCardsService, FfiErrorCode, FfiHttpRequest, FfiHttpResponse,
    FfiTransportFailure,
};
use mtg_ffi::{
    mtg_build_get_cards, mtg_build_get_cards_by_name, mtg_free_request, mtg_free_result,
    mtg_parse_cards, mtg_service_free, mtg_service_new, mtg_transport_failure,
};

fn c_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
}

/// Start the mock server on a random port on its own thread.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Execute `req` with ureq, reporting the outcome through the C ABI.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data and classified by the core.
fn execute(service: *const FfiCardsService, req: *mut FfiHttpRequest) -> *mut FfiCardsResult {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let url = c_str(unsafe { &*req }.url).to_string();
    mtg_free_request(req);

    match agent.get(&url).call() {
        Ok(mut response) => {
            let status = response.status().as_u16();
            let body = response.body_mut().read_to_string().unwrap_or_default();
            let body = CString::new(body).unwrap();
            let ffi_response = FfiHttpResponse {
                status,
                body: body.as_ptr(),
            };
            mtg_parse_cards(service, &ffi_response)
        }
        Err(error) => {
            let message = CString::new(error.to_string()).unwrap();
            mtg_transport_failure(service, FfiTransportFailure::Other, message.as_ptr())
        }
    }
}

fn card_names(result: *mut FfiCardsResult) -> Vec<String> {
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    let list = unsafe { &*r.cards };
    if list.len == 0 {
        return Vec::new();
    }
    let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
    items.iter().map(|card| c_str(card.name).to_string()).collect()
}

#[test]
fn browse_and_search_lifecycle() {
    let base = CString::new(spawn_server()).unwrap();
    let service = mtg_service_new(base.as_ptr());
    assert!(!service.is_null());

    // Step 1: list everything, in server order.
    let result = execute(service, mtg_build_get_cards(service));
    let expected: Vec<String> = mock_server::fixture_deck()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(card_names(result), expected);
    mtg_free_result(result);

    // Step 2: search by a name with a space.
    let name = CString::new("Black Lotus").unwrap();
    let result = execute(service, mtg_build_get_cards_by_name(service, name.as_ptr()));
    assert_eq!(card_names(result), ["Black Lotus"]);
    let list = unsafe { &*(*result).cards };
    let card = unsafe { &*list.items };
    assert_eq!(c_str(card.mana_cost), "{0}");
    assert!(c_str(card.description).starts_with("Name: Black Lotus\n"));
    mtg_free_result(result);

    // Step 3: a search with no matches is an empty success.
    let name = CString::new("Tarmogoyf").unwrap();
    let result = execute(service, mtg_build_get_cards_by_name(service, name.as_ptr()));
    assert!(card_names(result).is_empty());
    mtg_free_result(result);

    // Step 4: empty search is the full list again.
    let name = CString::new("").unwrap();
    let result = execute(service, mtg_build_get_cards_by_name(service, name.as_ptr()));
    assert_eq!(card_names(result).len(), expected.len());
    mtg_free_result(result);

    mtg_service_free(service);
}

#[test]
fn wrong_base_path_is_wrong_url() {
    let base = CString::new(format!("{}/missing", spawn_server())).unwrap();
    let service = mtg_service_new(base.as_ptr());

    let result = execute(service, mtg_build_get_cards(service));
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::WrongUrl);
    assert_eq!(r.http_status, 404);

    mtg_free_result(result);
    mtg_service_free(service);
}

#[test]
fn refused_connection_is_server_fail() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base = CString::new(format!("http://{addr}")).unwrap();
    let service = mtg_service_new(base.as_ptr());

    let result = execute(service, mtg_build_get_cards(service));
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::ServerFail);
    assert_eq!(r.http_status, 0);

    mtg_free_result(result);
    mtg_service_free(service);
}
