mod concurrent_access_test;
mod crud_test;
mod geo_query_test;
mod resolve_test;
