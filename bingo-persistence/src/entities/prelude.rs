pub use super::kv_entries::Entity as KvEntries;
