pub mod simmer_api;
