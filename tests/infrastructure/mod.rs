mod audio;
mod llm;
mod observability;
