pub mod plagiarism;
