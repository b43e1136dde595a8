mod object_store_supabase;

pub use object_store_supabase::SupabaseObjectStore;
