fn main() {
    slint_build::compile("ui/overlay.slint").unwrap();
}
