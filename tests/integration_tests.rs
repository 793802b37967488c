mod integration {
    mod pipeline_tests;
    mod report_tests;
}
