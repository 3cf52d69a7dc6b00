use std::fs::File;
use std::io::Read;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use coral_core::paths;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, info, warn};

const INDEX: &str = "index.html";

pub struct PreviewOpts {
    pub out_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub no_open: bool,
}

pub struct PreviewHandle {
    pub url: String,
    shutdown: Arc<AtomicBool>,
    join: JoinHandle<Result<()>>,
}

impl PreviewHandle {
    pub fn stop(self) -> Result<()> {
        self.shutdown.store(true, Ordering::SeqCst);
        match self.join.join() {
            Ok(result) => result,
            Err(_) => bail!("preview thread panicked"),
        }
    }
}

pub fn run_preview(opts: PreviewOpts) -> Result<()> {
    let out_dir = resolve_out_dir(opts.out_dir)?;
    let (server, addr) = bind_server(&opts.host, opts.port)?;
    let url = preview_url(&opts.host, addr);

    println!("Preview: {url}");
    info!(out = %out_dir.display(), "serving");

    if !opts.no_open {
        if let Err(err) = webbrowser::open(&url) {
            warn!("failed to open browser: {err}");
        }
    }

    serve_loop(server, out_dir, None)
}

pub fn spawn_preview(opts: PreviewOpts) -> Result<PreviewHandle> {
    let out_dir = resolve_out_dir(opts.out_dir)?;
    let (server, addr) = bind_server(&opts.host, opts.port)?;
    let url = preview_url(&opts.host, addr);
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_thread = shutdown.clone();
    let join = thread::spawn(move || serve_loop(server, out_dir, Some(shutdown_thread)));

    Ok(PreviewHandle { url, shutdown, join })
}

fn resolve_out_dir(out_dir: PathBuf) -> Result<PathBuf> {
    let out_dir = if out_dir.is_absolute() {
        out_dir
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(out_dir)
    };
    if !out_dir.is_dir() {
        bail!("Output dir does not exist. Run `coral_cli build` first or pass --out.");
    }
    Ok(out_dir)
}

fn bind_server(host: &str, port: u16) -> Result<(Server, SocketAddr)> {
    let addr = format!("{host}:{port}");
    let server = Server::http(&addr).map_err(|err| anyhow!("failed to bind to {addr}: {err}"))?;
    let actual = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| anyhow!("failed to resolve socket address"))?;
    Ok((server, actual))
}

fn preview_url(host: &str, addr: SocketAddr) -> String {
    format!("http://{host}:{}/", addr.port())
}

fn serve_loop(server: Server, out_dir: PathBuf, shutdown: Option<Arc<AtomicBool>>) -> Result<()> {
    loop {
        if let Some(flag) = &shutdown {
            if flag.load(Ordering::SeqCst) {
                break;
            }
        }

        let request = match server.recv_timeout(Duration::from_millis(200)) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => return Err(err.into()),
        };
        debug!(method = %request.method(), url = request.url(), "request");

        let response = match handle_request(&request, &out_dir) {
            Ok(response) => response,
            Err(err) => {
                warn!("{err:#}");
                Response::from_string("Internal Server Error")
                    .with_status_code(StatusCode(500))
                    .boxed()
            }
        };

        if let Err(err) = request.respond(response) {
            warn!("failed to send response: {err}");
        }
    }
    Ok(())
}

fn handle_request(
    request: &tiny_http::Request,
    out_dir: &Path,
) -> Result<Response<Box<dyn Read + Send>>> {
    if request.method() != &Method::Get && request.method() != &Method::Head {
        return Ok(Response::from_string("Method Not Allowed")
            .with_status_code(StatusCode(405))
            .boxed());
    }

    let full_path = sanitize_path(request.url())
        .map(|rel_path| out_dir.join(rel_path))
        .filter(|path| path.is_file());
    let (full_path, status): (PathBuf, u16) = match full_path {
        Some(path) => (path, 200),
        None => {
            // The generated "album not found" page doubles as the 404 body.
            let fallback = out_dir.join(paths::not_found_page().output);
            if !fallback.is_file() {
                return Ok(Response::from_string("Not Found")
                    .with_status_code(StatusCode(404))
                    .boxed());
            }
            (fallback, 404)
        }
    };

    let header = content_type_header(&full_path)?;
    if request.method() == &Method::Head {
        return Ok(Response::empty(status).with_header(header).boxed());
    }

    let file = File::open(&full_path)
        .with_context(|| format!("failed to open {}", full_path.display()))?;
    Ok(Response::from_file(file)
        .with_status_code(StatusCode(status))
        .with_header(header)
        .boxed())
}

fn sanitize_path(url: &str) -> Option<PathBuf> {
    let path = url.split('?').next().unwrap_or(url);
    let decoded = urlencoding::decode(path).ok()?;
    if decoded.contains('\\') {
        return None;
    }
    let trimmed = decoded.trim_start_matches('/');
    let effective = if trimmed.is_empty() { INDEX } else { trimmed };

    let mut clean = PathBuf::new();
    for component in Path::new(effective).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

fn content_type_header(path: &Path) -> Result<Header> {
    Header::from_bytes("Content-Type", content_type_for(path))
        .map_err(|()| anyhow!("invalid content type for {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{content_type_for, sanitize_path};

    #[test]
    fn root_maps_to_index() {
        assert_eq!(sanitize_path("/"), Some(PathBuf::from("index.html")));
        assert_eq!(sanitize_path("/?x=1"), Some(PathBuf::from("index.html")));
    }

    #[test]
    fn encoded_paths_are_decoded() {
        assert_eq!(
            sanitize_path("/album-0/view-1.html"),
            Some(PathBuf::from("album-0/view-1.html"))
        );
        assert_eq!(
            sanitize_path("/%C3%A1lbum.html"),
            Some(PathBuf::from("álbum.html"))
        );
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(sanitize_path("/../secret"), None);
        assert_eq!(sanitize_path("/%2E%2E/secret"), None);
        assert_eq!(sanitize_path("/a%5Cb"), None);
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(
            content_type_for(PathBuf::from("gallery.css").as_path()),
            "text/css; charset=utf-8"
        );
        assert_eq!(
            content_type_for(PathBuf::from("clip.bin").as_path()),
            "application/octet-stream"
        );
    }
}
