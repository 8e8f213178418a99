fn main() {
    dagster_chart::app::cli::run();
}
