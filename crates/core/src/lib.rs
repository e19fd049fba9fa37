pub mod autotagger;
pub mod config;
pub mod helpdesk;
pub mod metrics;
pub mod nlu;
pub mod testing;

pub use autotagger::{
    default_tag_formatter, merge_tags, AutotagError, Autotagger, AutotaggerConfig,
    DescriptionFormatter, RunOptions, RunSummary, TagFormatter, TaggedTicket,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use helpdesk::{HelpdeskError, Ticket, TicketSink, TicketSource, ZendeskClient, ZendeskConfig};
pub use nlu::{validate_threshold, Entity, EntityExtractor, NluError, WitClient, WitConfig};
