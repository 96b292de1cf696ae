// Service exports
pub mod cache;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
