pub mod source_dir;
