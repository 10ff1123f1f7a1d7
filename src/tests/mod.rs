mod method_decoding;
