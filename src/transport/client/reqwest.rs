use crate::{
	client::OAuth2ClientError,
	transport::{HttpClient, Timeout},
};

/// Sends the request with the client's own settings, redirect policy
/// included. Use a client built with [`reqwest::redirect::Policy::none()`].
impl HttpClient for reqwest::blocking::Client {
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		log::debug!("HTTP {} request to: {}", request.method(), request.uri());

		let timeout = request.extensions().get::<Timeout>().copied();
		let mut request: reqwest::blocking::Request =
			request.try_into().map_err(OAuth2ClientError::network)?;

		if let Some(Timeout(timeout)) = timeout {
			*request.timeout_mut() = Some(timeout);
		}

		// The response owns the connection; dropping it on any return path
		// hands the connection back to the pool or closes it.
		let response = self.execute(request).map_err(OAuth2ClientError::network)?;

		let mut builder = http::Response::builder()
			.status(response.status())
			.version(response.version());

		for (name, value) in response.headers().iter() {
			builder = builder.header(name, value);
		}

		let body = response
			.bytes()
			.map_err(OAuth2ClientError::network)?
			.to_vec();

		let response = builder.body(body).map_err(OAuth2ClientError::network)?;

		log::trace!("HTTP response: {response:?}");

		Ok(response)
	}
}

#[cfg(test)]
mod tests {
	use std::{
		io::{Read, Write},
		net::TcpListener,
		thread,
		time::Duration,
	};

	use super::*;

	/// Serves a single canned HTTP/1.1 response and returns the raw request.
	fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();

		let handle = thread::spawn(move || {
			let (mut stream, _) = listener.accept().unwrap();
			let mut request = Vec::new();
			let mut buf = [0u8; 4096];

			loop {
				let n = stream.read(&mut buf).unwrap();
				request.extend_from_slice(&buf[..n]);
				if n == 0 || request_complete(&request) {
					break;
				}
			}

			stream.write_all(response.as_bytes()).unwrap();
			String::from_utf8(request).unwrap()
		});

		(format!("http://{addr}/token"), handle)
	}

	fn request_complete(request: &[u8]) -> bool {
		let text = String::from_utf8_lossy(request);
		let Some(header_end) = text.find("\r\n\r\n") else {
			return false;
		};

		let content_length = text[..header_end]
			.lines()
			.find_map(|line| {
				let (name, value) = line.split_once(':')?;
				name.eq_ignore_ascii_case("content-length")
					.then(|| value.trim().parse::<usize>().ok())
					.flatten()
			})
			.unwrap_or(0);

		request.len() >= header_end + 4 + content_length
	}

	fn post(uri: &str, body: &str) -> http::Request<Vec<u8>> {
		http::Request::builder()
			.method(http::Method::POST)
			.uri(uri)
			.header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(body.as_bytes().to_vec())
			.unwrap()
	}

	#[test]
	fn round_trip() {
		let (uri, server) = serve_once(
			"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 12\r\nConnection: close\r\n\r\n{\"ok\":\"yes\"}",
		);

		let response = reqwest::blocking::Client::new()
			.send(post(&uri, "grant_type=authorization_code"))
			.unwrap();

		assert_eq!(response.status(), http::StatusCode::OK);
		assert_eq!(response.body(), b"{\"ok\":\"yes\"}");

		let request = server.join().unwrap();
		assert!(request.starts_with("POST /token HTTP/1.1"));
		assert!(request.ends_with("grant_type=authorization_code"));
	}

	#[test]
	fn error_status_is_not_a_transport_error() {
		let (uri, server) = serve_once(
			"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let response = reqwest::blocking::Client::new()
			.send(post(&uri, "code=x"))
			.unwrap();

		assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
		server.join().unwrap();
	}

	#[test]
	fn redirect_is_returned_unfollowed() {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let elsewhere = listener.local_addr().unwrap();
		drop(listener);

		let response: &'static str = Box::leak(
			format!(
				"HTTP/1.1 307 Temporary Redirect\r\nLocation: http://{elsewhere}/steal\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
			)
			.into_boxed_str(),
		);
		let (uri, server) = serve_once(response);

		let client = reqwest::blocking::Client::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.unwrap();
		let response = client.send(post(&uri, "code=x&code_verifier=v")).unwrap();

		assert_eq!(response.status(), http::StatusCode::TEMPORARY_REDIRECT);
		assert_eq!(
			response.headers()[http::header::LOCATION],
			format!("http://{elsewhere}/steal").as_str()
		);
		server.join().unwrap();
	}

	#[test]
	fn connection_refused_is_network_error() {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let result =
			reqwest::blocking::Client::new().send(post(&format!("http://{addr}/token"), "code=x"));

		assert!(matches!(result, Err(OAuth2ClientError::Network(_))));
	}

	#[test]
	fn timeout_is_network_error() {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();

		// Accept and hold the connection without ever answering.
		let server = thread::spawn(move || {
			let (stream, _) = listener.accept().unwrap();
			thread::sleep(Duration::from_millis(500));
			drop(stream);
		});

		let mut request = post(&format!("http://{addr}/token"), "code=x");
		request
			.extensions_mut()
			.insert(Timeout(Duration::from_millis(100)));

		let result = reqwest::blocking::Client::new().send(request);
		assert!(matches!(result, Err(OAuth2ClientError::Network(_))));

		server.join().unwrap();
	}
}
