mod builders_tests;
mod listings_tests;
mod matches_tests;
mod saved_searches_tests;
mod shortlists_tests;
