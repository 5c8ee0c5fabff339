pub mod blobchain;
