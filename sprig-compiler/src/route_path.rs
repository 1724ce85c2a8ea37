/// Output file of a route, relative to the output root.
///
/// An explicit `@Route({ path })` wins; otherwise the path is derived from
/// the source file's location.
pub fn route_output_path(rel_path: &str, explicit: Option<&str>) -> String {
    let path = match explicit {
        Some(p) => from_url_path(p),
        None => from_source_path(rel_path),
    };
    let path = if path.is_empty() { "index".to_string() } else { path };
    format!("routes/{path}.tsx")
}

/// The URL a route output file serves, for messages.
pub fn route_url(output_path: &str) -> String {
    let p = output_path.trim_start_matches("routes/").trim_end_matches(".tsx");
    let p = match p.strip_suffix("index") {
        Some(parent) if parent.is_empty() || parent.ends_with('/') => parent,
        _ => p,
    };
    format!("/{}", p.trim_end_matches('/'))
}

// `/users/:id` -> `users/[id]`
fn from_url_path(url: &str) -> String {
    url.trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| match segment {
            "*" | "**" => "[...rest]".to_string(),
            s => match s.strip_prefix(':') {
                Some(param) => format!("[{param}]"),
                None => s.to_string(),
            },
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn from_source_path(rel_path: &str) -> String {
    let normalized = rel_path.replace('\\', "/");
    let mut path = normalized.trim_start_matches("./").trim_start_matches('/');
    for ext in [".tsx", ".ts"] {
        path = path.strip_suffix(ext).unwrap_or(path);
    }
    for suffix in [".route", ".page", ".component"] {
        path = path.strip_suffix(suffix).unwrap_or(path);
    }

    let mut path = match path.find("/routes/") {
        Some(i) => format!("{}/{}", &path[..i], &path[i + "/routes/".len()..]),
        None => path.strip_prefix("routes/").unwrap_or(path).to_string(),
    };

    if path.starts_with('(') {
        if let Some(close) = path.find(")/") {
            path = path[close + 2..].to_string();
        }
    }

    if path == "home" {
        path = "index".to_string();
    } else if let Some(rest) = path.strip_prefix("home/") {
        path = rest.to_string();
    }

    if path == "_app" {
        path.clear();
    } else if let Some(parent) = path.strip_suffix("/_app") {
        path = parent.to_string();
    }
    path
}
