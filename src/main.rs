fn main() {
    overworld::run();
}
