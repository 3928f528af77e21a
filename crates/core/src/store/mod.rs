pub mod memory;
pub mod supabase;
pub mod traits;
