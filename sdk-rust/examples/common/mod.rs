use facts_sdk::supabase::{SupabaseStore, SupabaseStoreOptions};

pub fn get_store() -> SupabaseStore {
    SupabaseStore::new(SupabaseStoreOptions {
        base_url: std::env::var("SUPABASE_URL")
            .expect("SUPABASE_URL environment variable must be set"),
        api_key: std::env::var("SUPABASE_KEY")
            .expect("SUPABASE_KEY environment variable must be set"),
        ..Default::default()
    })
}
