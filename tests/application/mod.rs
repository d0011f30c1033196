mod prescription_generator_test;
