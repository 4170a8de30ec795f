pub mod media_cleanup;
pub mod media_delete;
pub mod media_get;
pub mod media_list;
pub mod media_stats;
pub mod media_upload;
