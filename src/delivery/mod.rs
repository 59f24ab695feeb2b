//! Chat channel delivery.
//!
//! Long summaries are split at natural break points ([`segment`]), laid out
//! as a header-bearing first message plus numbered parts
//! ([`format_messages`]), and posted in order ([`deliver`]).

mod format;
mod poster;
mod segment;

pub use format::{
    format_messages, DeliveryHeader, DeliveryMessage, Limits, MAX_PART_LABEL_LEN, SUMMARY_LABEL,
};
pub use poster::{deliver, DeliveryReport, MessageSink, PartFailure, WebhookPoster};
pub use segment::{segment, BREAK_MARKERS};
