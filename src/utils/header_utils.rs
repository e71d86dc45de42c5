use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Client address as reported by a proxy header
///
/// `X-Forwarded-For` (first entry) takes precedence over `X-Real-IP`.
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use pokedex_server::utils::header_utils::forwarded_ip;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
/// assert_eq!(forwarded_ip(&headers), Some("203.0.113.7".parse().unwrap()));
/// ```
pub fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(value) = headers.get("x-forwarded-for") {
        if let Some(ip) = value
            .to_str()
            .ok()
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse().ok())
        {
            return Some(ip);
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Client address of a request: proxy headers first, then the socket peer
pub fn extract_client_ip(req: &Request) -> Option<IpAddr> {
    forwarded_ip(req.headers()).or_else(|| {
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.1, 10.0.0.2".parse().unwrap());
        assert_eq!(forwarded_ip(&headers), Some("198.51.100.1".parse().unwrap()));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "garbage".parse().unwrap());
        headers.insert("x-real-ip", "2001:db8::1".parse().unwrap());
        assert_eq!(forwarded_ip(&headers), Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_no_headers() {
        assert_eq!(forwarded_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_connect_info_fallback() {
        let mut req = Request::new(Body::empty());
        let peer: SocketAddr = "127.0.0.1:4242".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(peer));

        assert_eq!(extract_client_ip(&req), Some(peer.ip()));
    }

    #[test]
    fn test_header_beats_connect_info() {
        let mut req = Request::new(Body::empty());
        req.headers_mut()
            .insert("x-real-ip", "192.0.2.9".parse().unwrap());
        req.extensions_mut()
            .insert(ConnectInfo("127.0.0.1:4242".parse::<SocketAddr>().unwrap()));

        assert_eq!(extract_client_ip(&req), Some("192.0.2.9".parse().unwrap()));
    }

    #[test]
    fn test_unknown_client() {
        let req = Request::new(Body::empty());
        assert_eq!(extract_client_ip(&req), None);
    }
}
