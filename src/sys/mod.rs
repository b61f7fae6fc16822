pub(crate) mod ioctl;
