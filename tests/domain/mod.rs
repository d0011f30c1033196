mod prescription_test;
mod storage_path_test;
