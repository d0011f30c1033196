mod openai_client_test;
