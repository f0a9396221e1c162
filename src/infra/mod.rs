pub mod openreview;
