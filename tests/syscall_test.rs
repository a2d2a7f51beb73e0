/*!
 * Syscall Tests
 * End-to-end dispatch of raw trap frames through fake collaborators
 */

use edu_os_kernel::syscalls::{
    Console, FileHandle, FileSystem, PowerControl, ProcessControl, SyscallResult,
};
use edu_os_kernel::{AddressSpace, Process, SyscallDispatcher, TrapFrame};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

const BASE: usize = 0x1000;
const SPACE: usize = 4096;
const ESP: usize = BASE;
// Scratch area above the argument words
const DATA: usize = BASE + 0x100;

struct FakeFs {
    files: Mutex<HashMap<String, Vec<u8>>>,
    handles: Mutex<HashMap<u64, String>>,
    written: Mutex<Vec<Vec<u8>>>,
    next_handle: AtomicU64,
    closed: AtomicUsize,
    // Bytes the fake actually accepts per write, to exercise short writes
    write_cap: usize,
}

impl FakeFs {
    fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            handles: Mutex::new(HashMap::new()),
            written: Mutex::new(Vec::new()),
            next_handle: AtomicU64::new(1),
            closed: AtomicUsize::new(0),
            write_cap: usize::MAX,
        }
    }

    fn with_write_cap(cap: usize) -> Self {
        Self {
            write_cap: cap,
            ..Self::new()
        }
    }

    fn add_file(&self, name: &str, contents: &[u8]) {
        self.files.lock().insert(name.into(), contents.to_vec());
    }
}

impl FileSystem for FakeFs {
    fn create(&self, name: &str, _initial_size: u32) -> bool {
        let mut files = self.files.lock();
        if files.contains_key(name) {
            return false;
        }
        files.insert(name.into(), Vec::new());
        true
    }

    fn open(&self, name: &str) -> Option<FileHandle> {
        if !self.files.lock().contains_key(name) {
            return None;
        }
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.handles.lock().insert(id, name.into());
        Some(FileHandle(id))
    }

    fn close(&self, handle: FileHandle) {
        self.handles.lock().remove(&handle.0);
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn read(&self, handle: FileHandle, buf: &mut [u8]) -> usize {
        let handles = self.handles.lock();
        let Some(name) = handles.get(&handle.0) else {
            return 0;
        };
        let files = self.files.lock();
        let contents = &files[name];
        let n = contents.len().min(buf.len());
        buf[..n].copy_from_slice(&contents[..n]);
        n
    }

    fn write(&self, _handle: FileHandle, buf: &[u8]) -> usize {
        let n = buf.len().min(self.write_cap);
        self.written.lock().push(buf[..n].to_vec());
        n
    }
}

struct ScriptedConsole {
    input: Mutex<VecDeque<u8>>,
    output: Mutex<Vec<u8>>,
}

impl ScriptedConsole {
    fn new(input: &[u8]) -> Self {
        Self {
            input: Mutex::new(input.iter().copied().collect()),
            output: Mutex::new(Vec::new()),
        }
    }
}

impl Console for ScriptedConsole {
    fn getc(&self) -> u8 {
        self.input.lock().pop_front().expect("console input empty")
    }

    fn put_buf(&self, buf: &[u8]) {
        self.output.lock().extend_from_slice(buf);
    }
}

struct FakePower {
    off: AtomicBool,
}

impl PowerControl for FakePower {
    fn power_off(&self) {
        self.off.store(true, Ordering::SeqCst);
    }
}

struct FakeControl {
    exec_result: Option<u32>,
    exits: Mutex<Vec<(u32, i32)>>,
    terminated: Mutex<Vec<u32>>,
}

impl FakeControl {
    fn new(exec_result: Option<u32>) -> Self {
        Self {
            exec_result,
            exits: Mutex::new(Vec::new()),
            terminated: Mutex::new(Vec::new()),
        }
    }
}

impl ProcessControl for FakeControl {
    fn execute(&self, _path: &str) -> Option<u32> {
        self.exec_result
    }

    fn exit(&self, pid: u32, status: i32) {
        self.exits.lock().push((pid, status));
    }

    fn terminate(&self, pid: u32) {
        self.terminated.lock().push(pid);
    }
}

struct TestKernel {
    dispatcher: SyscallDispatcher,
    fs: Arc<FakeFs>,
    console: Arc<ScriptedConsole>,
    power: Arc<FakePower>,
    control: Arc<FakeControl>,
}

fn setup() -> TestKernel {
    setup_with(FakeFs::new(), ScriptedConsole::new(&[]), FakeControl::new(Some(42)))
}

fn setup_with(fs: FakeFs, console: ScriptedConsole, control: FakeControl) -> TestKernel {
    let _ = env_logger::builder().is_test(true).try_init();
    let fs = Arc::new(fs);
    let console = Arc::new(console);
    let power = Arc::new(FakePower {
        off: AtomicBool::new(false),
    });
    let control = Arc::new(control);
    let dispatcher = SyscallDispatcher::new(
        fs.clone(),
        console.clone(),
        power.clone(),
        control.clone(),
    );
    TestKernel {
        dispatcher,
        fs,
        console,
        power,
        control,
    }
}

fn new_process() -> Process {
    Process::new(100, AddressSpace::new(BASE, SPACE))
}

/// Write the syscall number and argument words where the trap layer puts
/// them, returning the frame.
fn frame(process: &mut Process, words: &[u32]) -> TrapFrame {
    let space = process.address_space_mut();
    for (i, word) in words.iter().enumerate() {
        space.write_bytes(ESP + 4 * i, &word.to_le_bytes()).unwrap();
    }
    TrapFrame::new(ESP)
}

fn put_cstr(process: &mut Process, addr: usize, s: &str) {
    let space = process.address_space_mut();
    space.write_bytes(addr, s.as_bytes()).unwrap();
    space.write_bytes(addr + s.len(), &[0]).unwrap();
}

fn put_bytes(process: &mut Process, addr: usize, data: &[u8]) {
    process.address_space_mut().write_bytes(addr, data).unwrap();
}

fn open_file(kernel: &TestKernel, process: &mut Process, name: &str) -> Option<i32> {
    put_cstr(process, DATA, name);
    let mut f = frame(process, &[6, DATA as u32]);
    kernel.dispatcher.handle_trap(process, &mut f);
    f.return_value()
}

#[test]
fn test_open_assigns_lowest_free_descriptor() {
    let kernel = setup();
    kernel.fs.add_file("a.txt", b"");
    kernel.fs.add_file("b.txt", b"");
    kernel.fs.add_file("c.txt", b"");
    let mut process = new_process();

    assert_eq!(open_file(&kernel, &mut process, "a.txt"), Some(2));
    assert_eq!(open_file(&kernel, &mut process, "b.txt"), Some(3));

    // close(2), then the slot is reused
    let mut f = frame(&mut process, &[12, 2]);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(result, SyscallResult::NoReturn);
    assert_eq!(f.return_value(), None);

    assert_eq!(open_file(&kernel, &mut process, "c.txt"), Some(2));
}

#[test]
fn test_open_missing_file_returns_minus_one() {
    let kernel = setup();
    let mut process = new_process();
    assert_eq!(open_file(&kernel, &mut process, "nope.txt"), Some(-1));
    assert_eq!(process.descriptors().open_count(), 0);
}

#[test]
fn test_open_with_full_table_returns_minus_one() {
    let kernel = setup();
    kernel.fs.add_file("f.txt", b"");
    let mut process = new_process();
    for _ in 0..14 {
        assert_ne!(open_file(&kernel, &mut process, "f.txt"), Some(-1));
    }
    assert_eq!(open_file(&kernel, &mut process, "f.txt"), Some(-1));
}

#[test]
fn test_create_returns_boolean() {
    let kernel = setup();
    let mut process = new_process();
    put_cstr(&mut process, DATA, "new.txt");

    let mut f = frame(&mut process, &[4, DATA as u32, 512]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(1));

    // Creating the same file again fails
    let mut f = frame(&mut process, &[4, DATA as u32, 512]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(0));
}

#[test]
fn test_console_write_returns_size_and_delivers_prefix() {
    let kernel = setup();
    let mut process = new_process();
    put_bytes(&mut process, DATA, b"hello world");

    // Only the first 5 bytes are written
    let mut f = frame(&mut process, &[9, 1, DATA as u32, 5]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(5));
    assert_eq!(*kernel.console.output.lock(), b"hello".to_vec());
}

#[test]
fn test_write_to_console_input_is_rejected() {
    let kernel = setup();
    let mut process = new_process();
    put_bytes(&mut process, DATA, b"x");
    let mut f = frame(&mut process, &[9, 0, DATA as u32, 1]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(-1));
}

#[test]
fn test_file_write_reports_requested_size() {
    // The file system accepts only 3 bytes per write; the syscall still
    // reports the requested size
    let kernel = setup_with(
        FakeFs::with_write_cap(3),
        ScriptedConsole::new(&[]),
        FakeControl::new(None),
    );
    kernel.fs.add_file("log.txt", b"");
    let mut process = new_process();
    let fd = open_file(&kernel, &mut process, "log.txt").unwrap();

    put_bytes(&mut process, DATA, b"abcdef");
    let mut f = frame(&mut process, &[9, fd as u32, DATA as u32, 6]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(6));
    assert_eq!(*kernel.fs.written.lock(), vec![b"abc".to_vec()]);
}

#[test]
fn test_write_on_bad_descriptors_returns_minus_one() {
    let kernel = setup();
    let mut process = new_process();
    put_bytes(&mut process, DATA, b"x");

    for fd in [(-1i32) as u32, 5, 16, 99] {
        let mut f = frame(&mut process, &[9, fd, DATA as u32, 1]);
        kernel.dispatcher.handle_trap(&mut process, &mut f);
        assert_eq!(f.return_value(), Some(-1));
    }
    assert_eq!(process.descriptors().open_count(), 0);
}

#[test]
fn test_console_read_fills_buffer_in_order() {
    let kernel = setup_with(
        FakeFs::new(),
        ScriptedConsole::new(b"abcdef"),
        FakeControl::new(None),
    );
    let mut process = new_process();

    let mut f = frame(&mut process, &[8, 0, DATA as u32, 4]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(4));
    assert_eq!(process.address_space().read_bytes(DATA, 4).unwrap(), b"abcd");
}

#[test]
fn test_file_read_returns_actual_count() {
    let kernel = setup();
    kernel.fs.add_file("short.txt", b"xyz");
    let mut process = new_process();
    let fd = open_file(&kernel, &mut process, "short.txt").unwrap();

    let mut f = frame(&mut process, &[8, fd as u32, DATA as u32, 10]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(3));
    assert_eq!(process.address_space().read_bytes(DATA, 3).unwrap(), b"xyz");
}

#[test]
fn test_read_from_console_output_is_rejected() {
    let kernel = setup();
    let mut process = new_process();
    let mut f = frame(&mut process, &[8, 1, DATA as u32, 4]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(-1));
}

#[test]
fn test_unknown_syscall_is_ignored() {
    let kernel = setup();
    let mut process = new_process();

    // 3 is wait in the full numbering, outside this dispatcher's mapping
    let mut f = frame(&mut process, &[3, 7, 7, 7]);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(result, SyscallResult::NoReturn);
    assert_eq!(f.return_value(), None);
    assert!(kernel.control.terminated.lock().is_empty());
}

#[test]
fn test_hostile_pointer_terminates_caller() {
    let kernel = setup();
    let mut process = new_process();

    // open with a name pointer far outside the mapped region
    let mut f = frame(&mut process, &[6, 0xdead_beef]);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(result, SyscallResult::Terminated);
    assert_eq!(f.return_value(), None);
    assert_eq!(*kernel.control.terminated.lock(), vec![100]);
}

#[test]
fn test_unmapped_stack_pointer_terminates_caller() {
    let kernel = setup();
    let mut process = new_process();
    let mut f = TrapFrame::new(BASE + SPACE + 64);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert!(result.is_terminated());
    assert_eq!(*kernel.control.terminated.lock(), vec![100]);
}

#[test]
fn test_fault_releases_open_descriptors() {
    let kernel = setup();
    kernel.fs.add_file("a.txt", b"");
    let mut process = new_process();
    open_file(&kernel, &mut process, "a.txt").unwrap();

    let mut f = frame(&mut process, &[6, 0xdead_beef]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(kernel.fs.closed.load(Ordering::SeqCst), 1);
    assert_eq!(process.descriptors().open_count(), 0);
}

#[test]
fn test_exit_releases_descriptors_and_reports_status() {
    let kernel = setup();
    kernel.fs.add_file("a.txt", b"");
    kernel.fs.add_file("b.txt", b"");
    let mut process = new_process();
    open_file(&kernel, &mut process, "a.txt").unwrap();
    open_file(&kernel, &mut process, "b.txt").unwrap();

    let mut f = frame(&mut process, &[1, 5]);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(result, SyscallResult::Terminated);
    assert_eq!(f.return_value(), None);
    assert_eq!(kernel.fs.closed.load(Ordering::SeqCst), 2);
    assert_eq!(*kernel.control.exits.lock(), vec![(100, 5)]);
}

#[test]
fn test_exec_returns_new_pid() {
    let kernel = setup();
    let mut process = new_process();
    put_cstr(&mut process, DATA, "child.bin");
    let mut f = frame(&mut process, &[2, DATA as u32]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(42));
}

#[test]
fn test_exec_failure_returns_minus_one() {
    let kernel = setup_with(FakeFs::new(), ScriptedConsole::new(&[]), FakeControl::new(None));
    let mut process = new_process();
    put_cstr(&mut process, DATA, "child.bin");
    let mut f = frame(&mut process, &[2, DATA as u32]);
    kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(f.return_value(), Some(-1));
}

#[test]
fn test_halt_powers_off() {
    let kernel = setup();
    let mut process = new_process();
    let mut f = frame(&mut process, &[0]);
    let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
    assert_eq!(result, SyscallResult::NoReturn);
    assert_eq!(f.return_value(), None);
    assert!(kernel.power.off.load(Ordering::SeqCst));
}

#[test]
fn test_close_on_bad_descriptors_is_a_noop() {
    let kernel = setup();
    kernel.fs.add_file("a.txt", b"");
    let mut process = new_process();
    open_file(&kernel, &mut process, "a.txt").unwrap();

    for fd in [(-3i32) as u32, 0, 1, 9, 16, 1000] {
        let mut f = frame(&mut process, &[12, fd]);
        let result = kernel.dispatcher.handle_trap(&mut process, &mut f);
        assert_eq!(result, SyscallResult::NoReturn);
        assert_eq!(f.return_value(), None);
    }
    assert!(process.descriptors().is_open(2));
    assert_eq!(kernel.fs.closed.load(Ordering::SeqCst), 0);
}
