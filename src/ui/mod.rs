mod notify;
mod output;

pub use notify::{Notice, NoticeLevel, Notifications, NOTICE_TTL};
pub use output::{
    debug, display_breeds, display_favorites, display_help, display_locations, display_match,
    display_match_dialog, display_notices, display_search_view, display_view, format_dog_card,
    format_filters, format_pagination, terminal_width,
};
