//! HTTP tests for the translation client against a local endpoint.

use std::sync::mpsc;
use std::thread;

use babelterm::translate::{EndpointConfig, GoogleTranslator, TranslateError, Translator};
use tiny_http::{Response, Server};

/// Serve one request with `status` and `body`; the request URL and
/// User-Agent are sent back over the returned channel.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<(String, String)>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let agent = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("User-Agent"))
                .map(|h| h.value.to_string())
                .unwrap_or_default();
            let _ = tx.send((request.url().to_string(), agent));
            let _ = request.respond(Response::from_string(body).with_status_code(status));
        }
    });

    (format!("http://127.0.0.1:{port}/translate_a/single"), rx)
}

fn translator(url: String) -> GoogleTranslator {
    GoogleTranslator::new(EndpointConfig {
        url,
        ..EndpointConfig::default()
    })
}

#[test]
fn test_translates_through_endpoint() {
    let (url, rx) = serve_once(200, r#"[[["hola","hello",null,null,1]],null,"en"]"#);

    let result = translator(url).translate("hello", "en", "es").unwrap();

    assert_eq!(result, "hola");
    let (path, agent) = rx.recv().unwrap();
    assert_eq!(
        path,
        "/translate_a/single?client=gtx&sl=en&tl=es&dt=t&q=hello"
    );
    assert!(agent.starts_with("babelterm/"));
}

#[test]
fn test_joins_multiple_segments() {
    let (url, _rx) = serve_once(
        200,
        r#"[[["Bonjour. ","Hello. ",null,null,3],["Comment ça va ?","How are you?",null,null,3]],null,"en"]"#,
    );

    let result = translator(url).translate("Hello. How are you?", "en", "fr").unwrap();

    assert_eq!(result, "Bonjour. Comment ça va ?");
}

#[test]
fn test_text_is_percent_encoded() {
    let (url, rx) = serve_once(200, r#"[[["x","y",null,null,1]]]"#);

    translator(url).translate("a b&c=d", "en", "de").unwrap();

    let (path, _) = rx.recv().unwrap();
    assert!(path.ends_with("&q=a%20b%26c%3Dd"), "{path}");
}

#[test]
fn test_server_error_is_reported() {
    let (url, _rx) = serve_once(500, "internal error");

    let err = translator(url).translate("hello", "en", "es").unwrap_err();

    assert!(matches!(err, TranslateError::Http(_)), "{err:?}");
}

#[test]
fn test_non_json_body_is_reported() {
    let (url, _rx) = serve_once(200, "<html>captcha</html>");

    let err = translator(url).translate("hello", "en", "es").unwrap_err();

    assert!(matches!(err, TranslateError::Json(_)), "{err:?}");
}

#[test]
fn test_unexpected_shape_is_reported() {
    let (url, _rx) = serve_once(200, r#"{"error":"quota"}"#);

    let err = translator(url).translate("hello", "en", "es").unwrap_err();

    assert!(matches!(err, TranslateError::Malformed(_)), "{err:?}");
}

#[test]
fn test_unreachable_endpoint_is_reported() {
    // Bind and drop to obtain a port nobody listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = translator(format!("http://127.0.0.1:{port}/translate"))
        .translate("hello", "en", "es")
        .unwrap_err();

    assert!(matches!(err, TranslateError::Http(_)), "{err:?}");
}
