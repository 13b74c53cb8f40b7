//!
//! src/main.rs
//!
//! Main source file of unit tests for modules as well as
//! the fetch -> extract -> pick -> render -> write pipeline
//! that generates the badge
//!
//!

mod config;
mod errors;
mod logging;

mod fetch;
mod extract;
mod select;
mod render;
mod sink;

use chrono::Utc;

use crate::errors::BadgeError;
use crate::select::Selection;

fn main() -> Result<(), BadgeError> {
    let cfgs = config::load_config()?;
    let _guard = logging::init_logging(&cfgs.logging)?;

    tracing::info!(
        service="likes-badge",
        version=%env!("CARGO_PKG_VERSION"),
        user=%cfgs.badge.username,
        pool=cfgs.badge.pool,
        "starting"
    );

    let client = fetch::LikesClient::new(&cfgs.http, &cfgs.soundcloud)?;
    let likes_url = client.likes_url(&cfgs.badge.username)?;

    let page = client.likes_page(&likes_url)?;
    let tracks = extract::extract_likes(
        &page,
        &cfgs.soundcloud.base_url,
        cfgs.badge.pool
    );
    tracing::info!(count = tracks.len(), "extract.done");

    let mut rng = select::rng_for(cfgs.badge.seed.as_deref());
    let selection = select::pick_track(&tracks, &mut rng);
    match &selection {
        Selection::Track(track) => {
            tracing::info!(title = %track.title, artist = %track.artist, "select.track");
        }
        Selection::Empty => {
            tracing::warn!("select.empty");
        }
    }

    let svg = render::badge_svg(
        &cfgs.badge.username,
        &selection,
        cfgs.badge.pool,
        likes_url.as_str(),
        Utc::now()
    );

    let disk = sink::BadgeSink::new(&cfgs.badge.svg_path);
    disk.write_svg(&svg)?;
    println!("Wrote SVG: {}", cfgs.badge.svg_path.display());

    if let Some(readme) = cfgs.badge.readme_path.as_deref() {
        let changed = disk.ensure_readme_block(readme)?;
        if changed {
            println!("README block updated.");
        } else {
            println!("README block unchanged.");
        }
    }

    Ok(())
}
