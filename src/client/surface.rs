// src/client/surface.rs

//! Typed getters and setters for the surface's nodes.
//!
//! Getters are queries built on [`ArdourClient::request_single`]; setters
//! are commands built on [`ArdourClient::fire`] and do not wait for the
//! server to echo the new state.

use super::ArdourClient;
use crate::{Address, Error, Node, Result, TypedValue};

fn expect_f64(node: Node, value: TypedValue) -> Result<f64> {
    // ---
    value.as_f64().ok_or_else(|| {
        Error::ProtocolViolation(format!("{node}: expected a number, got {}", value.kind()))
    })
}

fn expect_bool(node: Node, value: TypedValue) -> Result<bool> {
    // ---
    value.as_bool().ok_or_else(|| {
        Error::ProtocolViolation(format!("{node}: expected a bool, got {}", value.kind()))
    })
}

impl ArdourClient {
    // ---

    /// Strip gain in dB. Silence is `-inf`.
    pub async fn strip_gain(&self, strip: u32) -> Result<f64> {
        // ---
        let value = self.request_single(Node::StripGain, [strip], vec![]).await?;
        expect_f64(Node::StripGain, value)
    }

    /// Strip pan position.
    pub async fn strip_pan(&self, strip: u32) -> Result<f64> {
        // ---
        let value = self.request_single(Node::StripPan, [strip], vec![]).await?;
        expect_f64(Node::StripPan, value)
    }

    pub async fn strip_mute(&self, strip: u32) -> Result<bool> {
        // ---
        let value = self.request_single(Node::StripMute, [strip], vec![]).await?;
        expect_bool(Node::StripMute, value)
    }

    pub async fn strip_plugin_enable(&self, strip: u32, plugin: u32) -> Result<bool> {
        // ---
        let value = self
            .request_single(Node::StripPluginEnable, [strip, plugin], vec![])
            .await?;
        expect_bool(Node::StripPluginEnable, value)
    }

    /// Plugin parameter value. The type depends on the parameter.
    pub async fn strip_plugin_param_value(
        &self,
        strip: u32,
        plugin: u32,
        param: u32,
    ) -> Result<TypedValue> {
        // ---
        self.request_single(Node::StripPluginParamValue, [strip, plugin, param], vec![])
            .await
    }

    /// Session tempo in BPM.
    pub async fn tempo(&self) -> Result<f64> {
        // ---
        let value = self
            .request_single(Node::TransportTempo, Address::global(), vec![])
            .await?;
        expect_f64(Node::TransportTempo, value)
    }

    /// True while the transport is rolling.
    pub async fn transport_roll(&self) -> Result<bool> {
        // ---
        let value = self
            .request_single(Node::TransportRoll, Address::global(), vec![])
            .await?;
        expect_bool(Node::TransportRoll, value)
    }

    /// True while record is armed.
    pub async fn record_state(&self) -> Result<bool> {
        // ---
        let value = self
            .request_single(Node::TransportRecord, Address::global(), vec![])
            .await?;
        expect_bool(Node::TransportRecord, value)
    }

    pub async fn set_strip_gain(&self, strip: u32, db: f64) -> Result<()> {
        // ---
        self.fire(Node::StripGain, [strip], vec![db.into()]).await?;
        Ok(())
    }

    pub async fn set_strip_pan(&self, strip: u32, value: f64) -> Result<()> {
        // ---
        self.fire(Node::StripPan, [strip], vec![value.into()]).await?;
        Ok(())
    }

    pub async fn set_strip_mute(&self, strip: u32, value: bool) -> Result<()> {
        // ---
        self.fire(Node::StripMute, [strip], vec![value.into()]).await?;
        Ok(())
    }

    pub async fn set_strip_plugin_enable(&self, strip: u32, plugin: u32, value: bool) -> Result<()> {
        // ---
        self.fire(Node::StripPluginEnable, [strip, plugin], vec![value.into()])
            .await?;
        Ok(())
    }

    pub async fn set_strip_plugin_param_value(
        &self,
        strip: u32,
        plugin: u32,
        param: u32,
        value: impl Into<TypedValue>,
    ) -> Result<()> {
        // ---
        self.fire(
            Node::StripPluginParamValue,
            [strip, plugin, param],
            vec![value.into()],
        )
        .await?;
        Ok(())
    }

    pub async fn set_tempo(&self, bpm: f64) -> Result<()> {
        // ---
        self.fire(Node::TransportTempo, Address::global(), vec![bpm.into()])
            .await?;
        Ok(())
    }

    pub async fn set_transport_roll(&self, value: bool) -> Result<()> {
        // ---
        self.fire(Node::TransportRoll, Address::global(), vec![value.into()])
            .await?;
        Ok(())
    }

    pub async fn set_record_state(&self, value: bool) -> Result<()> {
        // ---
        self.fire(Node::TransportRecord, Address::global(), vec![value.into()])
            .await?;
        Ok(())
    }
}
