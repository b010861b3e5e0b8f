use otty_vtparse::{Actor, Codepoint, Params, Parser};

#[derive(Default)]
struct MyActor;

impl Actor for MyActor {
    fn print(&mut self, c: Codepoint) {
        println!("print: {c}");
    }

    fn execute(&mut self, byte: u8) {
        println!("exec: {byte:#04x}");
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], byte: u8) {
        println!("ESC: interms={intermediates:?} final={byte:#04x}");
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], byte: u8) {
        println!(
            "CSI: params={params:?} interms={intermediates:?} truncated={} final={byte:#04x}",
            params.is_truncated()
        );
    }

    fn hook(&mut self, params: &Params, intermediates: &[u8], byte: u8) {
        println!(
            "DCS hook: params={params:?} interms={intermediates:?} final={byte:#04x}"
        );
    }

    fn put(&mut self, c: Codepoint) {
        println!("DCS put: {c:?}");
    }

    fn unhook(&mut self) {
        println!("DCS unhook");
    }

    fn osc_start(&mut self) {
        println!("OSC start");
    }

    fn osc_put(&mut self, c: Codepoint) {
        println!("OSC put: {c:?}");
    }

    fn osc_end(&mut self) {
        println!("OSC end");
    }
}

fn main() {
    let mut parser = Parser::new();
    let mut actor = MyActor::default();
    parser.advance(b"\x1b[31;1mhi\xc2!\x1b[0m\x1b]0;title\x07", &mut actor);
    parser.finish(&mut actor);
}
