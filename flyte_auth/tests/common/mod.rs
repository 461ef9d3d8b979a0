//! Browser-side helpers shared by the integration tests

use cookie::Cookie;
use http::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use http::{Method, Request};

/// Minimal cookie jar that replays `Set-Cookie` responses the way a browser would
#[derive(Debug, Default)]
pub struct MockBrowser {
    jar: Vec<(String, String)>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store cookies from a response; removal cookies evict the stored entry
    pub fn receive(&mut self, response: &HeaderMap) {
        for value in response.get_all(SET_COOKIE) {
            let cookie = Cookie::parse(value.to_str().unwrap().to_string()).unwrap();
            self.jar.retain(|(name, _)| name != cookie.name());
            if !cookie.value().is_empty() {
                let entry = (cookie.name().to_string(), cookie.value().to_string());
                self.jar.push(entry);
            }
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.jar
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.jar.retain(|(n, _)| n != name);
        self.jar.push((name.to_string(), value.to_string()));
    }

    pub fn cookie_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !self.jar.is_empty() {
            let joined = self
                .jar
                .iter()
                .map(|(n, v)| format!("{n}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.insert(COOKIE, HeaderValue::from_str(&joined).unwrap());
        }
        headers
    }

    /// The provider's redirect back to the callback endpoint
    pub fn callback_request(&self, state: &str) -> Request<Vec<u8>> {
        let mut request = Request::builder()
            .method(Method::GET)
            .uri(format!("/callback?code=provider-code&state={state}"))
            .body(Vec::new())
            .unwrap();
        *request.headers_mut() = self.cookie_header();
        request
    }

    /// A `form_post` response mode callback
    pub fn form_post_callback(&self, state: &str) -> Request<String> {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/callback")
            .body(format!("code=provider-code&state={state}"))
            .unwrap();
        *request.headers_mut() = self.cookie_header();
        request.headers_mut().insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request
    }
}
