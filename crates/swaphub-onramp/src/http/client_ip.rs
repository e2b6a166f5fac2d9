/*
[INPUT]:  Inbound request headers and the raw peer address
[OUTPUT]: Client IP string forwarded to the provider
[POS]:    HTTP layer - client IP derivation for the token exchange body
[UPDATE]: When proxy header handling changes
*/

use std::net::IpAddr;

use reqwest::header::HeaderMap;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const LOOPBACK: &str = "127.0.0.1";

/// Resolve the end user's IP.
///
/// Priority: first entry of `X-Forwarded-For`, then `X-Real-IP`, then the
/// connection peer, then loopback.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let forwarded = header_value(headers, FORWARDED_FOR)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    if let Some(ip) = header_value(headers, REAL_IP).map(str::trim).filter(|v| !v.is_empty()) {
        return ip.to_string();
    }

    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| LOOPBACK.to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
