//! Variant selection for the product detail page.
//!
//! Given a [`ProductDetail`](ecam_core::ProductDetail) and the page's query
//! string, this crate decides which option values are selected, which media
//! the gallery shows, what the product costs after its discount, and how the
//! current configuration is shared as a link or a prefilled message.
//!
//! Everything here is synchronous and side-effect free except for the
//! boundary traits in [`boundary`], which the host application implements.

pub mod boundary;
pub mod gallery;
pub mod lifetime;
pub mod message;
pub mod price;
pub mod query;
pub mod selection;
pub mod session;
pub mod share;
pub mod video;

pub use boundary::{Clipboard, ClipboardError, LinkOpener, QueryBoundary, QueryEcho};
pub use gallery::{color_option, derive_gallery, Gallery, GalleryItem};
pub use lifetime::{load_variant_page, PageLifetime, PageLoad, PageTicket};
pub use message::{build_outbound_message, messenger_link};
pub use price::{compute_display_price, format_usd, AppliedDiscount, DisplayPrice};
pub use query::{encode_query, parse_query, QueryParams};
pub use selection::{initialize, SelectedOptions};
pub use session::{ShareOutcome, VariantSession};
pub use share::{build_share_link, product_page_path};
pub use video::{resolve_video_id, VideoId};
