//!
//! src/extract.rs
//!
//! Scans the likes page markup for track entries and produces
//! an ordered pool of track records, bounded by the configured
//! pool size. A malformed entry is skipped, never fatal
//!

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub url: String
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Collapses an element's text nodes into single-spaced trimmed text.
/// html5ever already decoded entities during parsing, so no separate
/// unescape step is needed
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn absolute_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Walks `article` entries in document order (top = most recent)
/// and collects at most `limit` records
pub fn extract_likes(html: &str, base: &Url, limit: usize) -> Vec<TrackRecord> {
    let mut tracks = Vec::new();
    if limit == 0 {
        return tracks;
    }

    let document = Html::parse_document(html);
    let article_sel = selector("article");
    let title_sel   = selector(r#"h2[itemprop="name"] a[itemprop="url"]"#);
    let link_sel    = selector("a[href]");

    for article in document.select(&article_sel) {
        let Some(title_a) = article.select(&title_sel).next() else {
            tracing::debug!("extract.skip.no_title_link");
            continue;
        };

        let href = title_a.value().attr("href").unwrap_or_default();
        let Some(url) = absolute_url(base, href) else {
            tracing::debug!("extract.skip.bad_href");
            continue;
        };

        let title = element_text(title_a);

        // "by <a>Artist</a>" is usually the next link inside the same heading:
        // walk up to the heading that holds the title link, not just the
        // article's first one
        let heading = title_a.ancestors().find_map(|node| {
            ElementRef::wrap(node).filter(|el| el.value().name() == "h2")
        });
        let artist = heading
            .and_then(|h2| h2.select(&link_sel).find(|a| a.id() != title_a.id()))
            .map(element_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        tracks.push(TrackRecord { title, artist, url });
        if tracks.len() >= limit {
            break;
        }
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://soundcloud.com/").unwrap()
    }

    fn entry(title: &str, track_href: &str, artist: Option<(&str, &str)>) -> String {
        let artist_a = match artist {
            Some((name, href)) => format!(r#" by <a href="{href}">{name}</a>"#),
            None => String::new(),
        };
        format!(
            r#"<article>
                 <h2 itemprop="name">
                   <a itemprop="url" href="{track_href}">{title}</a>{artist_a}
                 </h2>
               </article>"#
        )
    }

    fn page(entries: &[String]) -> String {
        format!("<html><body>{}</body></html>", entries.join("\n"))
    }

    #[test]
    fn extracts_min_of_entries_and_limit_in_order() {
        let entries: Vec<String> = (0..5)
            .map(|i| {
                let artist = format!("Artist {i}");
                let artist_href = format!("/artist-{i}");
                entry(
                    &format!("Track {i}"),
                    &format!("/someone/track-{i}"),
                    Some((artist.as_str(), artist_href.as_str()))
                )
            })
            .collect();
        let html = page(&entries);

        let three = extract_likes(&html, &base(), 3);
        assert_eq!(three.len(), 3);
        assert_eq!(three[0].title, "Track 0");
        assert_eq!(three[2].title, "Track 2");

        let all = extract_likes(&html, &base(), 20);
        assert_eq!(all.len(), 5);
        assert_eq!(all[4].artist, "Artist 4");
    }

    #[test]
    fn limit_zero_yields_nothing() {
        let html = page(&[entry("Track", "/a/t", None)]);
        assert!(extract_likes(&html, &base(), 0).is_empty());
    }

    #[test]
    fn entry_without_title_link_is_skipped() {
        let malformed =
            r#"<article><h2 itemprop="name">no link here</h2></article>"#.to_string();
        let entries = vec![
            entry("First", "/a/first", None),
            malformed,
            entry("Second", "/a/second", None),
        ];
        let tracks = extract_likes(&page(&entries), &base(), 10);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "First");
        assert_eq!(tracks[1].title, "Second");
    }

    #[test]
    fn relative_urls_are_resolved_against_base() {
        let entries = vec![
            entry("Rel", "/someone/rel-track", None),
            entry("Abs", "https://soundcloud.com/someone/abs-track", None),
        ];
        let tracks = extract_likes(&page(&entries), &base(), 10);
        assert_eq!(tracks[0].url, "https://soundcloud.com/someone/rel-track");
        assert_eq!(tracks[1].url, "https://soundcloud.com/someone/abs-track");
    }

    #[test]
    fn missing_artist_defaults_to_unknown() {
        let tracks = extract_likes(
            &page(&[entry("Lone Track", "/a/lone", None)]), &base(), 10
        );
        assert_eq!(tracks[0].artist, UNKNOWN_ARTIST);
    }

    #[test]
    fn second_heading_link_becomes_the_artist() {
        let tracks = extract_likes(
            &page(&[entry("Song", "/a/song", Some(("DJ Someone", "/dj-someone")))]),
            &base(),
            10
        );
        assert_eq!(tracks[0].artist, "DJ Someone");
    }

    #[test]
    fn artist_comes_from_the_title_heading() {
        // an earlier heading without the title link must not supply the artist
        let article = r#"<article>
            <h2 itemprop="name"><a href="/stray">Stray Link</a></h2>
            <h2 itemprop="name">
              <a itemprop="url" href="/real/track">Real Track</a>
              by <a href="/real-artist">Real Artist</a>
            </h2>
          </article>"#.to_string();

        let tracks = extract_likes(&page(&[article]), &base(), 10);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Real Track");
        assert_eq!(tracks[0].artist, "Real Artist");
    }

    #[test]
    fn entities_are_decoded() {
        let tracks = extract_likes(
            &page(&[entry("Drum &amp; Bass &lt;3", "/a/dnb", None)]), &base(), 10
        );
        assert_eq!(tracks[0].title, "Drum & Bass <3");
    }

    #[test]
    fn heading_text_is_whitespace_normalized() {
        let html = page(&[entry("  Spaced \n   Out  ", "/a/spaced", None)]);
        let tracks = extract_likes(&html, &base(), 10);
        assert_eq!(tracks[0].title, "Spaced Out");
    }
}
