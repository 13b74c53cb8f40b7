//!
//! src/render.rs
//!
//! Renders the fixed-layout svg card for a selection. All
//! interpolated text is escaped for xml, titles and artists are
//! truncated to the card's character caps
//!

use chrono::{DateTime, Utc};

use crate::select::Selection;

pub const CARD_W: u32 = 720;
pub const CARD_H: u32 = 160;

pub const TITLE_MAX_CHARS: usize = 48;
pub const ARTIST_MAX_CHARS: usize = 36;
pub const POOL_DISPLAY_CAP: usize = 999;

const BG: &str = "#0B0B0B";
const PANEL: &str = "#111111";
const BORDER: &str = "#1F1F1F";
const TEXT: &str = "#F5F5F5";
const MUTED: &str = "#B3B3B3";
const ORANGE: &str = "#FF5500";

const FONT: &str =
    "ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial";

// static bar heights, decorative only
const WAVEFORM_HEIGHTS: [u32; 17] =
    [10, 26, 14, 34, 18, 42, 22, 30, 12, 38, 16, 28, 20, 44, 14, 26, 10];

/// Escape for XML text nodes/attributes
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trims, then caps at `max_chars` characters, appending an ellipsis
/// whenever the text was shortened
pub fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn waveform_bars() -> String {
    let mut bars = Vec::with_capacity(WAVEFORM_HEIGHTS.len());
    for (i, bh) in WAVEFORM_HEIGHTS.iter().enumerate() {
        let x = 28 + (i as u32) * 10;
        let y = 34 + (44 - bh);
        bars.push(format!(
            r#"<rect x="{x}" y="{y}" width="6" height="{bh}" rx="3" fill="{ORANGE}" opacity="0.95"/>"#
        ));
    }
    bars.join("\n        ")
}

/// Whole card is one clickable link: the track when one was picked,
/// the profile's likes page otherwise
pub fn badge_svg(
    username: &str,
    selection: &Selection,
    pool: usize,
    likes_url: &str,
    now: DateTime<Utc>
) -> String {
    let stamp = now.format("%Y-%m-%d %H:%M UTC").to_string();

    let (title, artist, url, subtitle) = match selection {
        Selection::Track(track) => (
            truncate(&track.title, TITLE_MAX_CHARS),
            truncate(&track.artist, ARTIST_MAX_CHARS),
            track.url.clone(),
            format!(
                "Random pick from your last {} likes",
                pool.min(POOL_DISPLAY_CAP)
            ),
        ),
        Selection::Empty => (
            "No public likes found".to_string(),
            format!("@{username}"),
            likes_url.to_string(),
            "Make sure your Likes page is public.".to_string(),
        ),
    };

    let title_xml    = xml_escape(&title);
    let artist_xml   = xml_escape(&artist);
    let subtitle_xml = xml_escape(&subtitle);
    let url_xml      = xml_escape(&url);
    let user_xml     = xml_escape(username);
    let stamp_xml    = xml_escape(&stamp);
    let bars_svg     = waveform_bars();

    let w = CARD_W;
    let h = CARD_H;
    let panel_w = CARD_W - 24;
    let panel_h = CARD_H - 24;
    let right = CARD_W - 28;
    let tag_left = CARD_W - 70;
    let tag_right = CARD_W - 24;
    let tag_text_x = CARD_W - 34;

    format!(
r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="SoundCloud random recent like">
  <defs>
    <linearGradient id="bgGrad" x1="0" x2="0" y1="0" y2="1">
      <stop offset="0" stop-color="{PANEL}"/>
      <stop offset="1" stop-color="{BG}"/>
    </linearGradient>
    <filter id="shadow" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="0" dy="10" stdDeviation="14" flood-color="#000" flood-opacity="0.45"/>
    </filter>
  </defs>

  <a href="{url_xml}" target="_blank">
    <rect x="12" y="12" width="{panel_w}" height="{panel_h}" rx="18" fill="url(#bgGrad)" stroke="{BORDER}" filter="url(#shadow)"/>

    <!-- Header -->
    <text x="28" y="34" fill="{ORANGE}" font-family="{FONT}" font-size="14" font-weight="800" letter-spacing="0.2">
      SOUNDCLOUD
    </text>
    <text x="{right}" y="34" fill="{MUTED}" text-anchor="end" font-family="{FONT}" font-size="12" font-weight="600">
      @{user_xml}
    </text>

    <!-- Waveform accent -->
    <g transform="translate(0,0)">
      {bars_svg}
    </g>

    <!-- Title / Artist -->
    <text x="28" y="92" fill="{TEXT}" font-family="{FONT}" font-size="22" font-weight="800">
      {title_xml}
    </text>
    <text x="28" y="118" fill="{MUTED}" font-family="{FONT}" font-size="14" font-weight="650">
      {artist_xml}
    </text>

    <!-- Footer -->
    <text x="28" y="142" fill="{MUTED}" font-family="{FONT}" font-size="12">
      {subtitle_xml}
    </text>
    <text x="{right}" y="142" fill="{MUTED}" text-anchor="end" font-family="{FONT}" font-size="12">
      Updated {stamp_xml}
    </text>

    <!-- Orange corner tag -->
    <path d="M{tag_left} 24 L{tag_right} 24 L{tag_right} 70 Z" fill="{ORANGE}" opacity="0.9"/>
    <text x="{tag_text_x}" y="46" fill="#111" text-anchor="end" font-family="{FONT}" font-size="12" font-weight="900">♥</text>
  </a>
</svg>
"##
    )
}
