mod proptest_tokens;
