//! Routing URL path segments through a path trie
use path_trie::PathTrie;
use tracing::info;
use url::Url;

fn segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|parts| parts.filter(|s| !s.is_empty()).map(String::from).collect())
        .unwrap_or_default()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Create some example URLs
    let pages = vec![
        ("https://example.com/about", "About us"),
        ("https://example.com/contact", "Contact info"),
        ("https://example.com/blog/first-post", "First blog post"),
        ("https://example.com/blog/second-post", "Second blog post"),
    ];

    let mut routes = PathTrie::new();
    for (address, title) in &pages {
        let url = Url::parse(address)?;
        routes = routes.update(&segments(&url), title.to_string());
    }
    info!(pages = routes.len(), "Registered routes");

    // Lookup values by URL
    let blog_post = Url::parse("https://example.com/blog/first-post")?;
    println!("Looking up URLs:");
    println!("  {} → {:?}", blog_post, routes.get(&segments(&blog_post)));

    // "blog" has no page of its own, only children
    let blog = Url::parse("https://example.com/blog")?;
    println!("  {} → {:?}", blog, routes.get(&segments(&blog)));

    println!("\nBlog section pages:");
    if let Some(section) = routes.find(&segments(&blog)) {
        for (path, title) in section.children().iter_from(&segments(&blog)) {
            println!("  /{} → {}", path.join("/"), title);
        }
    }

    // Retire a page; the blog section survives while it still has posts
    let routes = routes.remove(&segments(&blog_post));
    println!("\nAfter removing {}:", blog_post);
    for (path, title) in &routes {
        println!("  /{} → {}", path.join("/"), title);
    }

    Ok(())
}
